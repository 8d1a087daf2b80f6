//! Deadline equality laws.

use flowdesk::model::DeadlineUnit;
use flowdesk::{deadlines_equal, ProcessDeadline};

fn samples() -> Vec<ProcessDeadline> {
    vec![
        ProcessDeadline::Relative {
            value: "2".to_string(),
            unit: DeadlineUnit::Days,
            node_id: "n1".to_string(),
            node_label: None,
        },
        ProcessDeadline::Relative {
            value: "2".to_string(),
            unit: DeadlineUnit::Hours,
            node_id: "n1".to_string(),
            node_label: Some("Intake".to_string()),
        },
        ProcessDeadline::Absolute {
            value: "2024-01-01T00:00:00Z".to_string(),
            node_id: "n1".to_string(),
            node_label: None,
        },
        ProcessDeadline::Absolute {
            value: "2024-01-01T00:00:00Z".to_string(),
            node_id: "n2".to_string(),
            node_label: Some(String::new()),
        },
    ]
}

#[test]
fn test_reflexive() {
    for d in samples() {
        assert!(deadlines_equal(Some(&d), Some(&d)));
        let copy = d.clone();
        assert!(deadlines_equal(Some(&d), Some(&copy)));
    }
}

#[test]
fn test_symmetric() {
    let all = samples();
    for a in &all {
        for b in &all {
            assert_eq!(
                deadlines_equal(Some(a), Some(b)),
                deadlines_equal(Some(b), Some(a))
            );
        }
    }
}

#[test]
fn test_distinct_samples_unequal() {
    let all = samples();
    for (i, a) in all.iter().enumerate() {
        for (j, b) in all.iter().enumerate() {
            assert_eq!(deadlines_equal(Some(a), Some(b)), i == j);
        }
    }
}

#[test]
fn test_relative_vs_absolute_same_anchor() {
    let relative = ProcessDeadline::Relative {
        value: "2".to_string(),
        unit: DeadlineUnit::Days,
        node_id: "n1".to_string(),
        node_label: None,
    };
    let absolute = ProcessDeadline::Absolute {
        value: "2024-01-01T00:00:00Z".to_string(),
        node_id: "n1".to_string(),
        node_label: None,
    };
    assert!(!deadlines_equal(Some(&relative), Some(&absolute)));
    assert_ne!(relative, absolute);
}

#[test]
fn test_absent_values() {
    assert!(deadlines_equal(None, None));
    for d in samples() {
        assert!(!deadlines_equal(None, Some(&d)));
        assert!(!deadlines_equal(Some(&d), None));
    }
}
