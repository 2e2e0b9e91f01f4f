//! # Validation Tier Tests (T0-T4)
//!
//! If ANY tier fails, the engine is INVALID.
//!
//! ## Tiers
//! - T0: Term and Sentence Integrity
//! - T1: Truth Calculus
//! - T2: Bounded Containers
//! - T3: Inference
//! - T4: Control Loop Scenarios

use nars_core::{
    Actuator, Bag, Engine, EngineEvent, EvidentialValue, IdSequence, InferenceContext, Item,
    NarsConfig, NarsError, Rule, Sentence, Term, TruthFunction, infer, parse_sentence, parse_term,
};

fn seeded() -> NarsConfig {
    NarsConfig::seeded(2024)
}

// =============================================================================
// TIER T0: TERM AND SENTENCE INTEGRITY
// =============================================================================

mod t0_term_integrity {
    use super::*;

    /// T0.1: Canonical rendering is whitespace-normalized.
    #[test]
    fn canonical_rendering() {
        let term = parse_term("( robin-->  bird )").expect("parse");
        assert_eq!(term.as_str(), "(robin --> bird)");
    }

    /// T0.2: Symmetric statements are order-independent.
    #[test]
    fn symmetric_statements_compare_equal() {
        let a = parse_term("(swan <-> gull)").expect("parse");
        let b = parse_term("(gull <-> swan)").expect("parse");
        assert_eq!(a, b);
    }

    /// T0.3: Malformed terms are rejected.
    #[test]
    fn malformed_terms_rejected() {
        for text in ["(a --> b", "", "(a -->)", "(&&a,b)"] {
            assert!(
                matches!(parse_term(text), Err(NarsError::Syntax(_))),
                "accepted {:?}",
                text
            );
        }
    }

    /// T0.4: Sentence punctuation, tense and values are parsed.
    #[test]
    fn sentence_fields() {
        let mut ids = IdSequence::new();
        let s = parse_sentence("(a --> b). :|: %0.8;0.7%", &mut ids, 5).expect("parse");
        assert!(s.is_judgment());
        assert_eq!(s.occurrence_time(), Some(5));
        let v = s.value().expect("value");
        assert!((v.frequency() - 0.8).abs() < 1e-12);
        assert!((v.confidence() - 0.7).abs() < 1e-12);

        let q = parse_sentence("(a --> b)?", &mut ids, 5).expect("parse");
        assert!(q.is_question() && q.needs_answer() && q.value().is_none());
    }

    /// T0.5: A failed parse does not consume an id.
    #[test]
    fn failed_parse_keeps_ids() {
        let mut ids = IdSequence::new();
        assert!(parse_sentence("(a --> b)", &mut ids, 0).is_err());
        assert_eq!(ids.peek(), 0);
    }
}

// =============================================================================
// TIER T1: TRUTH CALCULUS
// =============================================================================

mod t1_truth_calculus {
    use super::*;

    /// T1.1: Deduction of (0.9, 0.9) with itself.
    #[test]
    fn deduction_values() {
        let v = EvidentialValue::new(0.9, 0.9);
        let d = TruthFunction::Deduction.apply(v, v, 1.0);
        assert!((d.frequency() - 0.81).abs() < 1e-9);
        assert!((d.confidence() - 0.6561).abs() < 1e-9);
    }

    /// T1.2: Revision of opposite evidence averages frequency and adds confidence.
    #[test]
    fn revision_of_opposite_evidence() {
        let r = TruthFunction::Revision.apply(
            EvidentialValue::new(1.0, 0.9),
            EvidentialValue::new(0.0, 0.9),
            1.0,
        );
        assert!((r.frequency() - 0.5).abs() < 1e-9);
        assert!(r.confidence() > 0.9);
    }

    /// T1.3: Confidence is clamped away from 0 and 1.
    #[test]
    fn confidence_clamped() {
        assert!(EvidentialValue::new(1.0, 1.0).confidence() < 1.0);
        assert!(EvidentialValue::new(1.0, 0.0).confidence() > 0.0);
        assert!(EvidentialValue::checked(1.5, 0.5).is_err());
    }
}

// =============================================================================
// TIER T2: BOUNDED CONTAINERS
// =============================================================================

mod t2_containers {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// T2.1: Eviction favors the lowest-quality item.
    #[test]
    fn eviction_prefers_low_quality() {
        let mut rng = StdRng::seed_from_u64(11);
        let trials = 500;
        let mut low_evicted = 0;
        for _ in 0..trials {
            let mut bag: Bag<()> = Bag::new(2, 10);
            bag.put_new("valued".into(), (), &mut rng);
            bag.put_new("neglected".into(), (), &mut rng);
            bag.change_quality("valued", 0.95);
            bag.change_quality("neglected", 0.05);
            let evicted = bag.put_new("newcomer".into(), (), &mut rng);
            assert_eq!(bag.len(), 2);
            if evicted.map(|(key, _)| key).as_deref() == Some("neglected") {
                low_evicted += 1;
            }
        }
        assert!(
            low_evicted > trials * 8 / 10,
            "low-quality item evicted {} of {} times",
            low_evicted,
            trials
        );
    }

    /// T2.2: Sampling favors high priority.
    #[test]
    fn sampling_prefers_high_priority() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut bag: Bag<()> = Bag::new(10, 10);
        bag.put_new("hot".into(), (), &mut rng);
        bag.put_new("cold".into(), (), &mut rng);
        bag.change_priority("hot", 0.95);
        bag.change_priority("cold", 0.05);
        let hot = (0..1000)
            .filter(|_| bag.peek_random(&mut rng).map(Item::key) == Some("hot"))
            .count();
        assert!(hot > 800, "high-priority item sampled {} times", hot);
    }
}

// =============================================================================
// TIER T3: INFERENCE
// =============================================================================

mod t3_inference {
    use super::*;

    fn premise(text: &str, ids: &mut IdSequence) -> Sentence {
        parse_sentence(text, ids, 0).expect("parse")
    }

    /// T3.1: Robin is a bird, a bird is an animal, so a robin is an animal.
    #[test]
    fn syllogism_derives_deduction() {
        let config = NarsConfig::default();
        let mut ids = IdSequence::new();
        let j1 = premise("(robin --> bird). %0.9;0.9%", &mut ids);
        let j2 = premise("(bird --> animal). %0.9;0.9%", &mut ids);
        let mut ctx = InferenceContext::new(&config, &mut ids, 0);
        let results = infer(&mut ctx, &j1, &j2).expect("infer");
        let deduction = results
            .iter()
            .find(|s| s.stamp().derived_by() == Some(Rule::Deduction))
            .expect("deduction");
        assert_eq!(deduction.statement().as_str(), "(robin --> animal)");
        let v = deduction.value().expect("value");
        assert!((v.frequency() - 0.81).abs() < 1e-9);
        assert!((v.confidence() - 0.6561).abs() < 1e-9);
    }

    /// T3.2: Shared evidence blocks inference.
    #[test]
    fn shared_evidence_does_not_interact() {
        let config = NarsConfig::default();
        let mut ids = IdSequence::new();
        let j1 = premise("(robin --> bird).", &mut ids);
        let j2 = premise("(bird --> animal).", &mut ids);
        let mut ctx = InferenceContext::new(&config, &mut ids, 0);
        let results = infer(&mut ctx, &j1, &j2).expect("infer");
        for derived in &results {
            assert!(matches!(
                infer(&mut ctx, derived, &j2),
                Err(NarsError::NoInteraction)
            ));
        }
    }

    /// T3.3: Wholly negative evidence is vacuous.
    #[test]
    fn negative_evidence_is_vacuous() {
        let config = NarsConfig::default();
        let mut ids = IdSequence::new();
        let j1 = premise("(robin --> bird). %0.0;0.9%", &mut ids);
        let j2 = premise("(bird --> animal).", &mut ids);
        let mut ctx = InferenceContext::new(&config, &mut ids, 0);
        assert!(matches!(
            infer(&mut ctx, &j1, &j2),
            Err(NarsError::VacuousPremise)
        ));
    }
}

// =============================================================================
// TIER T4: CONTROL LOOP SCENARIOS
// =============================================================================

mod t4_control_loop {
    use super::*;

    #[derive(Debug, Default)]
    struct Motor {
        commands: Vec<String>,
    }

    impl Actuator for Motor {
        fn send_motor_command(&mut self, operation: &Term) {
            self.commands.push(operation.to_string());
        }
    }

    fn statement(text: &str) -> Term {
        parse_term(text).expect("term")
    }

    fn answers(events: &[EngineEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, EngineEvent::Answer { .. }))
            .count()
    }

    /// T4.1: Opposite evidence about one statement is revised into one belief.
    #[test]
    fn scenario_revision() {
        let mut engine = Engine::with_config(NarsConfig {
            consider_per_cycle: 0,
            ..seeded()
        })
        .expect("engine");
        engine.submit("(bird --> animal).%1.0;0.9%").expect("submit");
        engine.submit("(bird --> animal).%0.0;0.9%").expect("submit");
        engine.step();

        let concept = engine
            .memory()
            .concept(&statement("(bird --> animal)"))
            .expect("concept");
        assert_eq!(concept.beliefs().len(), 1);
        let v = concept.beliefs().peek().and_then(Sentence::value).expect("value");
        assert!(v.confidence() > 0.9);
        assert!(v.frequency() > 0.0 && v.frequency() < 1.0);
    }

    /// T4.2: Related beliefs meet and yield a deduction.
    #[test]
    fn scenario_deduction() {
        let mut engine = Engine::with_config(seeded()).expect("engine");
        engine.submit("(robin --> bird).%0.9;0.9%").expect("submit");
        engine.submit("(bird --> animal).%0.9;0.9%").expect("submit");

        let target = statement("(robin --> animal)");
        let derived = |engine: &Engine| {
            engine.memory().concept(&target).is_some_and(|c| {
                c.beliefs().iter().any(|s| {
                    s.stamp().derived_by() == Some(Rule::Deduction)
                        && s.value().is_some_and(|v| {
                            (v.frequency() - 0.81).abs() < 1e-9
                                && (v.confidence() - 0.6561).abs() < 1e-9
                        })
                })
            })
        };
        let mut cycles = 0;
        while !derived(&engine) && cycles < 200 {
            engine.step();
            cycles += 1;
        }
        assert!(derived(&engine), "no deduction after {} cycles", cycles);
    }

    /// T4.3: A question is answered once, only after a belief exists.
    #[test]
    fn scenario_question() {
        let mut engine = Engine::with_config(NarsConfig {
            consider_per_cycle: 0,
            ..seeded()
        })
        .expect("engine");
        engine.submit("(robin --> animal)?").expect("submit");
        engine.run_cycles(3);
        assert_eq!(answers(&engine.drain_events()), 0);

        engine.submit("(robin --> animal).%0.81;0.66%").expect("submit");
        engine.step();
        engine.submit("(robin --> animal)?").expect("submit");
        engine.run_cycles(3);
        assert_eq!(answers(&engine.drain_events()), 1);
        engine.run_cycles(3);
        assert_eq!(answers(&engine.drain_events()), 0);
    }

    const GRAB: &str = "((*,{SELF}) --> ^grab)";
    const LIFT: &str = "((*,{SELF}) --> ^lift)";

    fn goal_decision(config: NarsConfig, cycles: u64) -> Vec<String> {
        let mut engine = Engine::new(config, Motor::default()).expect("engine");
        engine.submit("((*,{SELF}) --> ^wait)! %0.1;0.9%").expect("submit");
        engine.run_cycles(5);
        assert!(engine.actuator().commands.is_empty());

        engine.submit("((*,{SELF}) --> ^grab)! %1.0;0.9%").expect("submit");
        engine.run_cycles(cycles);
        engine.actuator().commands.clone()
    }

    fn operation_sequence(config: NarsConfig, cycles: u64) -> Vec<String> {
        let mut engine = Engine::new(config, Motor::default()).expect("engine");
        engine
            .submit("(&/,((*,{SELF}) --> ^grab),1,((*,{SELF}) --> ^lift))! %1.0;0.9%")
            .expect("submit");
        engine.run_cycles(cycles);
        engine.actuator().commands.clone()
    }

    /// T4.4: Only desirable goals reach the actuator, once per atomic operation.
    #[test]
    fn scenario_goal_decision() {
        let config = NarsConfig {
            consider_per_cycle: 0,
            ..seeded()
        };
        assert_eq!(goal_decision(config, 5), vec![GRAB.to_string()]);
    }

    /// T4.4 with background attention: revisiting the desire does not act again.
    #[test]
    fn scenario_goal_decision_default_loop() {
        assert_eq!(goal_decision(seeded(), 20), vec![GRAB.to_string()]);
    }

    /// T4.5: A sequential goal executes its operations in order, once each.
    #[test]
    fn scenario_operation_sequence() {
        let config = NarsConfig {
            consider_per_cycle: 0,
            ..seeded()
        };
        assert_eq!(
            operation_sequence(config, 3),
            vec![GRAB.to_string(), LIFT.to_string()]
        );
    }

    /// T4.5 with background attention over many cycles.
    #[test]
    fn scenario_operation_sequence_default_loop() {
        assert_eq!(
            operation_sequence(seeded(), 20),
            vec![GRAB.to_string(), LIFT.to_string()]
        );
    }

    /// T4.6: Bad input leaves the engine as it was.
    #[test]
    fn malformed_input_rejected() {
        let mut engine = Engine::with_config(seeded()).expect("engine");
        assert!(engine.submit("robin --> bird.").is_err());
        assert!(engine.submit("(robin --> bird)").is_err());
        assert_eq!(engine.buffered(), 0);
        engine.step();
        assert!(engine.memory().is_empty());
    }
}
