use uaclass::{CachedClassifier, DEFAULT_CACHE_CAPACITY};

fn main() {
    let cached = match CachedClassifier::bundled(DEFAULT_CACHE_CAPACITY) {
        Ok(cached) => cached,
        Err(e) => {
            eprintln!("failed to load ruleset: {e}");
            std::process::exit(1);
        }
    };
    println!("{}", cached.inner());

    let traffic = [
        "Mozilla/5.0 (Macintosh; U; Intel Mac OS X 10.4; fr; rv:1.9.1.5) Gecko/20091102 Firefox/3.5.5",
        "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)",
        "Mozilla/5.0 (Macintosh; U; Intel Mac OS X 10.4; fr; rv:1.9.1.5) Gecko/20091102 Firefox/3.5.5",
        "Mozilla/5.0 (SMART-TV; Linux; Tizen 2.3) AppleWebKit/538.1",
    ];

    for ua in traffic {
        if let Some(result) = cached.classify(ua) {
            println!("{result}");
        }
    }

    let stats = cached.stats();
    println!(
        "{} entries, hit rate {:.0}%",
        cached.len(),
        stats.hit_rate() * 100.0
    );
}
