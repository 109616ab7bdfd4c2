// bondmatch_rgraph/src/bin/overlap_demo.rs
//
use bondmatch_common::Config;
use bondmatch_common::fixtures::{BENZENE, PYRIDINE, TOLUENE};
use bondmatch_rgraph::IsomorphismTester;
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let cfg = Config::builder().match_bonds(true).build();
    let tester = IsomorphismTester::new(cfg);

    let overlaps = tester.overlaps(&TOLUENE, &PYRIDINE)?;
    info!("toluene / pyridine: {} maximal overlaps", overlaps.len());
    for (i, fragment) in overlaps.iter().enumerate() {
        let atoms: Vec<String> = fragment.atoms().iter().map(ToString::to_string).collect();
        println!(
            "overlap {}: {} atoms, {} bonds [{}]",
            i,
            fragment.atom_count(),
            fragment.bond_count(),
            atoms.join(" ")
        );
    }

    println!("benzene in toluene: {}", tester.is_subgraph(&TOLUENE, &BENZENE)?);
    if let Some(map) = tester.subgraph_atom_map(&TOLUENE, &BENZENE)? {
        let pairs: Vec<String> = map.iter().map(ToString::to_string).collect();
        println!("atom map: {}", pairs.join(" "));
    }

    if tester.timed_out() {
        println!("(search timed out, results may be incomplete)");
    }

    Ok(())
}
