use u_bitga::ga::{
    BreakCondition, Chromosome, Crossover, GaConfig, GaError, GaRunner, Population, Selection,
};

fn one_max(c: &Chromosome) -> f64 {
    c.count_ones() as f64
}

fn small_config(seed: u64) -> Result<GaConfig, GaError> {
    Ok(GaConfig::default()
        .with_population_size(4)?
        .with_chromosome_length(8)?
        .with_selection(Selection::Cutoff { divider: 2 })?
        .with_crossover(Crossover::SinglePoint)
        .with_crossover_chance(1.0)?
        .with_mutation_chance(0.0)?
        .with_break_condition(BreakCondition::GenerationCount(50))?
        .with_parallel(false)
        .with_seed(seed))
}

#[test]
fn cutoff_single_point_reaches_all_ones() -> Result<(), GaError> {
    // Without mutation no new bits appear, so a run reaches 8 only when the
    // four random starts already cover every position in the right halves.
    // That holds for roughly 1% of starts, so the check is that some of 200
    // seeded runs get there while every run keeps its shape.
    let mut reached = 0;
    for seed in 0..200 {
        let mut runner = GaRunner::new(small_config(seed)?, one_max)?;
        let result = runner.run()?;

        assert_eq!(result.generations, 50);
        assert_eq!(result.history.len(), 50);
        assert_eq!(result.population.len(), 4);
        assert!(result.population.iter().all(|c| c.len() == 8));

        let peak = result.peak_fitness().expect("50 generations ran");
        assert!(peak <= 8.0);
        if peak == 8.0 {
            reached += 1;
        }
    }
    assert!(reached > 0, "no seeded run reached the all-ones chromosome");
    Ok(())
}

#[test]
fn seeded_population_with_all_material_converges() -> Result<(), GaError> {
    // The two best seeds together cover every position, so single-point
    // crossover can assemble 11111111.
    let seed = Population::new(
        ["11110000", "00001111", "00000000", "10000000"]
            .iter()
            .map(|s| s.parse::<Chromosome>())
            .collect::<Result<Vec<_>, _>>()?,
    )?;
    let mut hits = 0;
    for rng_seed in 0..20 {
        let mut runner = GaRunner::with_population(small_config(rng_seed)?, one_max, seed.clone())?;
        let result = runner.run()?;
        if result.peak_fitness() == Some(8.0) {
            hits += 1;
        }
    }
    assert!(hits > 0, "expected at least one run to reach 8");
    Ok(())
}

#[test]
fn roulette_over_zero_fitness_is_reported() -> Result<(), GaError> {
    let config = small_config(1)?.with_selection(Selection::Roulette)?;
    let mut runner = GaRunner::new(config, |_: &Chromosome| 0.0)?;
    match runner.run() {
        Err(GaError::Aborted { generation: 1, source }) => {
            assert!(matches!(*source, GaError::DegenerateSelection { .. }));
        }
        other => panic!("expected degenerate selection, got {other:?}"),
    }
    Ok(())
}

#[test]
fn unsupported_tags_fail_at_configuration() {
    assert!(matches!(
        GaConfig::default().with_selection_tag("tournament"),
        Err(GaError::UnsupportedMethod { .. })
    ));
    assert!(GaConfig::default().with_crossover_tag("uniform").is_err());
    assert!(GaConfig::default().with_break_tag("stagnation", 10.0).is_err());
}
