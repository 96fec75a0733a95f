use std::sync::Arc;
use std::thread;

use uaclass::{CachedClassifier, ClassifierBuilder};

fn main() {
    let classifier = ClassifierBuilder::new()
        .user_agent_rule(|r| r.regex(r"(Firefox|Chrome)/(\d+)\.(\d+)"))
        .os_rule(|r| r.regex(r"(Windows) NT (\d+)\.(\d+)"))
        .os_rule(|r| r.regex(r"(Linux)"))
        .build()
        .unwrap();

    let cached = Arc::new(CachedClassifier::new(classifier, 1024).unwrap());

    let requests = [
        ("worker-1", "Mozilla/5.0 (Windows NT 10.0; Win64; x64) Chrome/119.0.0.0"),
        ("worker-2", "Mozilla/5.0 (X11; Linux x86_64; rv:120.0) Firefox/120.0"),
        ("worker-3", "Mozilla/5.0 (Windows NT 10.0; Win64; x64) Chrome/119.0.0.0"),
        ("worker-4", "python-requests/2.31"),
    ];

    let handles: Vec<_> = requests
        .into_iter()
        .map(|(name, ua)| {
            let c = Arc::clone(&cached);
            thread::spawn(move || {
                let result = c.classify(ua);
                (name, result)
            })
        })
        .collect();

    for h in handles {
        let (name, result) = h.join().unwrap();
        if let Some(result) = result {
            println!("{name}: {} on {}", result.user_agent, result.os);
        }
    }

    let stats = cached.stats();
    println!("cache: {} hits, {} misses", stats.hits, stats.misses);
}
