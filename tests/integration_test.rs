use chrono::NaiveTime;
use surtido_rotation::models::{SkipCounter, WorkerFlags};
use surtido_rotation::services::{FairnessScorer, PriorityResolver, TextExtractor};
use surtido_rotation::{logger, AssignmentFlow, Config, SessionInput, SessionLedger};

fn at(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn shift_input() -> SessionInput {
    SessionInput {
        history: "\
1 - 30, 2 - 28, 3 - 31, 5 - 0, 6 - 25
1 - 29, 2 - 30, 3 - 27, 5 - 0, 6 - 26
1 - 31, 2 - 29, 3 - 30, 5 - 0, 6 - 24
"
        .to_string(),
        today: "\
1  MARTA     12
2  JOSE      10
3  LUCIA     11
5  PABLO     0
6  ANDRES    9
"
        .to_string(),
        orders: "\
PEDIDO   PRIO  PIEZAS
470101 1 4
470102 5 30
470103 4 12
470104 6 40
470105 9 8
4701061015
470107 3 6 CANCELADO
470108 2 3
"
        .to_string(),
        workers: vec![WorkerFlags {
            id: 6,
            present: true,
            on_meal: false,
            pardoned: false,
        }],
    }
}

fn config() -> Config {
    Config {
        roster: vec![1, 2, 3, 5, 6],
        ..Default::default()
    }
}

#[test]
fn test_full_pipeline_morning() {
    logger::init(false);

    let flow = AssignmentFlow::new(&config()).unwrap();
    let plan = flow.run(&shift_input(), &SkipCounter::new(), at(10, 30)).unwrap();

    // 5 号最近三个周期都是 0 → 缺勤，按基线计分，不被惩罚
    let w5 = plan.score_card.get(5).unwrap();
    assert!(w5.absent);
    assert!(!w5.penalized);
    assert_eq!(plan.score_card.baseline, 22);
    assert_eq!(w5.score, 22);

    let ids: Vec<&str> = plan
        .rotation
        .assignments
        .iter()
        .map(|a| a.order.id.as_str())
        .collect();
    assert_eq!(
        ids,
        vec!["470101", "470108", "470104", "470102", "470103", "470105", "470106"]
    );

    // 分数最低的 5 号先接单，且不会连续两单
    assert_eq!(plan.rotation.assignments[0].worker, 5);
    for pair in plan.rotation.assignments.windows(2) {
        assert_ne!(pair[0].worker, pair[1].worker);
    }
}

#[test]
fn test_full_pipeline_after_local_cutoff() {
    let flow = AssignmentFlow::new(&config()).unwrap();
    let plan = flow.run(&shift_input(), &SkipCounter::new(), at(12, 50)).unwrap();

    let order: Vec<(&str, u8)> = plan
        .rotation
        .assignments
        .iter()
        .map(|a| (a.order.id.as_str(), a.effective_priority))
        .collect();
    assert_eq!(
        order,
        vec![
            ("470101", 1),
            ("470108", 2),
            ("470104", 3),
            ("470105", 9),
            ("470106", 10),
            ("470102", 16),
            ("470103", 16),
        ]
    );
}

#[test]
fn test_example_roster_of_three() {
    let config = Config {
        roster: vec![1, 2, 3],
        ..Default::default()
    };
    let extractor = TextExtractor::new(&config).unwrap();
    let today = extractor.parse_counts("1 5\n2 5\n3 0\n");
    let roster = SessionInput::default().roster(&config.roster);

    let card = FairnessScorer::new(&config).score(&Default::default(), &today, &roster);
    assert_eq!(card.get(3).unwrap().score, 10);

    let mut ledger = SessionLedger::new(&config).unwrap();
    let input = SessionInput {
        today: "1 5\n2 5\n3 0\n".to_string(),
        orders: "470001 4 10\n".to_string(),
        ..Default::default()
    };
    let plan = ledger.calculate(&input, at(9, 0)).unwrap();
    assert_eq!(plan.rotation.assignments[0].worker, 1);
}

#[test]
fn test_next_best_is_isolated_from_other_rows() {
    let mut ledger = SessionLedger::new(&config()).unwrap();
    let baseline: Vec<_> = {
        ledger.calculate(&shift_input(), at(10, 30)).unwrap();
        ledger.display_rows()
    };

    ledger.assign_next_best("470103").unwrap();
    let first = ledger.display_rows();
    ledger.assign_next_best("470103").unwrap();
    let second = ledger.display_rows();

    assert_eq!(ledger.skip_count("470103"), 2);
    for ((b, f), s) in baseline.iter().zip(&first).zip(&second) {
        if b.order_id == "470103" {
            assert_eq!(f.skip, 1);
            assert_eq!(s.skip, 2);
        } else {
            assert_eq!(b, f);
            assert_eq!(b, s);
        }
    }
}

#[test]
fn test_everyone_on_meal_leaves_orders_unassigned() {
    let mut input = shift_input();
    input.workers = config()
        .roster
        .iter()
        .map(|&id| WorkerFlags {
            id,
            present: true,
            on_meal: true,
            pardoned: false,
        })
        .collect();

    let flow = AssignmentFlow::new(&config()).unwrap();
    let plan = flow.run(&input, &SkipCounter::new(), at(10, 0)).unwrap();
    assert!(plan.rotation.assignments.is_empty());
    assert_eq!(plan.rotation.unassigned.len(), 7);
}

#[test]
fn test_priority_escalation_examples() {
    let resolver = PriorityResolver::default();
    assert_eq!(resolver.resolve(5, at(12, 44)), 3);
    assert_eq!(resolver.resolve(5, at(12, 46)), 16);
    assert_eq!(resolver.resolve(8, at(12, 46)), 8);
    assert_eq!(resolver.resolve(8, at(23, 0)), 8);
}
