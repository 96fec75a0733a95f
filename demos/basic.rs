use uaclass::ClassifierBuilder;

fn main() {
    let classifier = ClassifierBuilder::new()
        .user_agent_rule(|r| r.regex(r"(Firefox)/(\d+)\.(\d+)(?:\.(\d+)|)"))
        .user_agent_rule(|r| {
            r.regex(r"(iPhone|iPad).+Version/(\d+)\.(\d+)(?:\.(\d+)|).*Safari")
                .replace("family_replacement", "Mobile Safari")
        })
        .os_rule(|r| {
            r.regex(r"iPhone OS (\d+)_(\d+)(?:_(\d+)|)")
                .replace("os_replacement", "iOS")
                .replace("os_v1_replacement", "$1")
                .replace("os_v2_replacement", "$2")
                .replace("os_v3_replacement", "$3")
        })
        .os_rule(|r| {
            r.regex(r"Mac OS X (\d+)[_.](\d+)")
                .replace("os_replacement", "Mac OS X")
                .replace("os_v1_replacement", "$1")
                .replace("os_v2_replacement", "$2")
        })
        .device_rule(|r| {
            r.regex("(iPhone|iPad)")
                .replace("brand_replacement", "Apple")
        })
        .device_rule(|r| {
            r.regex("Macintosh")
                .replace("device_replacement", "Mac")
                .replace("brand_replacement", "Apple")
                .replace("model_replacement", "Mac")
        })
        .build()
        .unwrap();

    println!("{classifier}");

    let inputs = [
        Some("Mozilla/5.0 (Macintosh; U; Intel Mac OS X 10.4; fr; rv:1.9.1.5) Gecko/20091102 Firefox/3.5.5"),
        Some("Mozilla/5.0 (iPhone; CPU iPhone OS 5_1_1 like Mac OS X) AppleWebKit/534.46 (KHTML, like Gecko) Version/5.1 Mobile/9B206 Safari/7534.48.3"),
        Some("curl/8.4.0"),
        None,
    ];

    for input in inputs {
        match classifier.classify(input) {
            Some(result) => println!("{result}"),
            None => println!("(no user agent)"),
        }
    }
}
