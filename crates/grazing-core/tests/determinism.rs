use grazing_core::{SimConfig, World};

fn small_config(seed: u64) -> SimConfig {
    SimConfig {
        seed,
        width: 48,
        height: 48,
        initial_grazers: 12,
        initial_grown_patches: 40,
        initial_juvenile_patches: 250,
        max_steps: 200,
        ..SimConfig::default()
    }
}

fn run(seed: u64) -> (grazing_core::RunSummary, usize) {
    let mut world = World::new(small_config(seed)).expect("config is valid");
    let summary = world.run_to_completion(25).expect("arguments are valid");
    (summary, world.total_agents_created())
}

#[test]
fn same_seed_reproduces_the_run() {
    let (a, created_a) = run(11);
    let (b, created_b) = run(11);
    assert_eq!(a.initial, b.initial);
    assert_eq!(a.final_population, b.final_population);
    assert_eq!(a.deaths, b.deaths);
    assert_eq!(a.total_births, b.total_births);
    assert_eq!(created_a, created_b);
    let pools_a: Vec<_> = a.samples.iter().map(|s| (s.step, s.grazer_food_pool)).collect();
    let pools_b: Vec<_> = b.samples.iter().map(|s| (s.step, s.grazer_food_pool)).collect();
    assert_eq!(pools_a, pools_b);
}

#[test]
fn summary_report_and_json_cover_the_run() {
    let (summary, _) = run(3);
    assert_eq!(summary.steps, 200);
    assert_eq!(summary.samples.len(), 8);
    assert_eq!(summary.initial.grazers, 12);
    assert_eq!(summary.initial.fully_grown_patches, 40);

    let report = summary.render_report();
    assert!(report.contains("Dimensions: 48x48"));
    assert!(report.contains(&format!(
        "Patch Frayed Death: {}",
        summary.deaths.patch_frayed
    )));

    let json = serde_json::to_string(&summary).expect("summary serializes");
    let parsed: grazing_core::RunSummary = serde_json::from_str(&json).expect("summary parses");
    assert_eq!(parsed.deaths, summary.deaths);
    assert_eq!(parsed.final_population, summary.final_population);
}

#[test]
fn pools_stay_non_negative_over_a_full_season() {
    let mut world = World::new(small_config(5)).expect("config is valid");
    while !world.is_finished() {
        world.step();
        assert!(world.pools().grazer_food_pool() >= 0.0);
        assert!(world.pools().aggregate_patch_health() >= 0.0);
        assert_eq!(world.grid().agent_count(), world.agent_count());
    }
    assert_eq!(world.step_index(), 200);
}
