use std::sync::OnceLock;

use bondmatch_common::Config;
use bondmatch_rgraph::IsomorphismTester;

pub fn init_test_logger() {
    static INIT: OnceLock<()> = OnceLock::new();
    let _ = INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn tester(match_bonds: bool) -> IsomorphismTester {
    init_test_logger();
    IsomorphismTester::new(Config::builder().match_bonds(match_bonds).build())
}
