use super::common::*;
use crate::triage::engine::{
    Escalation, CALL_EMERGENCY_DIRECTIVE, CRITICAL_KEYWORDS, EMERGENCY_ROOM_DIRECTIVE,
    HIGH_KEYWORDS, KEEP_CALM_STEP, MONITOR_DIRECTIVE,
};
use crate::triage::severity::{severity_label, urgency_for};

#[test]
fn minor_scrape_passes_through_unchanged() {
    let raw = scrape();
    let engine = engine();

    let assessment = engine.score(&raw);
    let plan = engine.build_plan(
        raw.injury_type(),
        assessment.final_severity,
        raw.first_aid_steps.as_deref(),
    );

    assert_eq!(assessment.final_severity, 1);
    assert!(!assessment.escalated);
    assert!(assessment.escalation_reason.is_empty());
    assert_eq!(assessment.confidence_level, 90);
    assert_eq!(assessment.severity_label, "Minor");
    assert_eq!(
        plan.steps(),
        &[MONITOR_DIRECTIVE.to_string(), "Clean with water".to_string()]
    );
}

#[test]
fn laceration_with_bleeding_escalates_to_severe() {
    let raw = laceration();
    let engine = engine();

    let assessment = engine.score(&raw);
    let plan = engine.build_plan(
        raw.injury_type(),
        assessment.final_severity,
        raw.first_aid_steps.as_deref(),
    );

    assert_eq!(assessment.final_severity, 4);
    assert!(assessment.escalated);
    assert_eq!(
        assessment.escalation_reason,
        "High-severity keyword: \"bleeding\""
    );
    assert_eq!(plan.directive(), EMERGENCY_ROOM_DIRECTIVE);
    assert_eq!(plan.len(), 1);
}

#[test]
fn unconscious_burn_escalates_to_critical_on_first_listed_keyword() {
    let raw = unconscious_burn();
    let engine = engine();

    let assessment = engine.score(&raw);
    let plan = engine.build_plan(raw.injury_type(), assessment.final_severity, None);

    assert_eq!(assessment.final_severity, 5);
    assert!(assessment.escalated);
    assert_eq!(
        assessment.escalations,
        vec![Escalation::CriticalKeyword {
            keyword: "unconscious".to_string()
        }]
    );
    assert_eq!(plan.directive(), CALL_EMERGENCY_DIRECTIVE);
    assert_eq!(plan.steps().last().map(String::as_str), Some(KEEP_CALM_STEP));
    assert!(assessment.requires_emergency_services());
}

#[test]
fn low_confidence_bumps_severity_without_flagging_escalation() {
    let assessment = engine().score(&uncertain_bruise());

    assert_eq!(assessment.final_severity, 2);
    assert_eq!(assessment.escalation_reason, "Low confidence score");
    assert!(!assessment.escalated);
    assert!(assessment.confidence_penalty_applied);
    assert_eq!(assessment.confidence_level, 30);
}

#[test]
fn confident_unmatched_inputs_keep_their_severity() {
    let engine = engine();
    for severity in 1..=4 {
        for confidence in [0.6, 0.75, 1.0] {
            let assessment =
                engine.score(&with_description(severity, NEUTRAL_DESCRIPTION, confidence));
            assert_eq!(assessment.final_severity, severity);
            assert!(!assessment.escalated);
            assert!(assessment.escalation_reason.is_empty());
        }
    }
}

#[test]
fn every_critical_keyword_forces_critical() {
    let engine = engine();
    for keyword in CRITICAL_KEYWORDS {
        for severity in 1..=4 {
            let description = format!("patient presents with {keyword}");
            let assessment = engine.score(&with_description(severity, &description, 0.9));
            assert_eq!(assessment.final_severity, 5, "keyword {keyword}");
            assert!(assessment.escalated);
            assert!(
                assessment.escalation_reason.contains(keyword),
                "reason {:?} should name {keyword}",
                assessment.escalation_reason
            );
        }
    }
}

#[test]
fn every_high_keyword_raises_to_severe_floor() {
    let engine = engine();
    for keyword in HIGH_KEYWORDS {
        for severity in 1..=4 {
            let description = format!("patient presents with {keyword}");
            let assessment = engine.score(&with_description(severity, &description, 0.9));
            assert_eq!(assessment.final_severity, 4, "keyword {keyword}");
            assert_eq!(assessment.escalated, severity < 4, "keyword {keyword}");
            if severity < 4 {
                assert!(assessment.escalation_reason.contains(keyword));
            } else {
                assert!(assessment.escalation_reason.is_empty());
            }
        }
    }
}

#[test]
fn low_confidence_adds_one_after_keyword_rules() {
    let engine = engine();
    let cases = [
        (NEUTRAL_DESCRIPTION, None),
        ("open wound on shin", Some(4)),
        ("sudden chest pain", Some(5)),
    ];

    for (description, keyword_floor) in cases {
        for severity in 1..=4 {
            for confidence in [0.0, 0.3, 0.59] {
                let prior = keyword_floor.map_or(severity, |floor: i32| floor.max(severity));
                let assessment = engine.score(&with_description(severity, description, confidence));
                assert_eq!(
                    assessment.final_severity,
                    (prior + 1).min(5),
                    "{description} at severity {severity}"
                );
                assert!(assessment.escalation_reason.ends_with("Low confidence score"));
            }
        }
    }
}

#[test]
fn keyword_and_confidence_reasons_are_joined() {
    let assessment = engine().score(&with_description(1, "puncture from a nail", 0.4));

    assert_eq!(assessment.final_severity, 5);
    assert!(assessment.escalated);
    assert_eq!(
        assessment.escalation_reason,
        "High-severity keyword: \"puncture\"; Low confidence score"
    );
}

#[test]
fn final_severity_never_drops_below_input() {
    let engine = engine();
    let descriptions = [NEUTRAL_DESCRIPTION, "laceration", "choking", ""];
    for severity in 1..=5 {
        for description in descriptions {
            for confidence in [0.1, 0.9] {
                let assessment = engine.score(&with_description(severity, description, confidence));
                assert!(assessment.final_severity >= severity);
                assert!((1..=5).contains(&assessment.final_severity));
            }
        }
    }
}

#[test]
fn out_of_range_severities_are_clamped_after_the_rules() {
    let engine = engine();

    let low = engine.score(&with_description(0, NEUTRAL_DESCRIPTION, 0.9));
    assert_eq!(low.raw_severity, 0);
    assert_eq!(low.final_severity, 1);

    let high = engine.score(&with_description(9, NEUTRAL_DESCRIPTION, 0.9));
    assert_eq!(high.final_severity, 5);
    assert_eq!(high.severity_label, "Critical");
}

#[test]
fn missing_title_is_reported_as_unknown_injury() {
    let raw = crate::triage::RawClassification::new(2, "", "swollen ankle", 0.8);
    let assessment = engine().score(&raw);
    assert_eq!(assessment.injury_type, "Unknown Injury");
}

#[test]
fn keywords_in_the_title_are_matched() {
    let raw = crate::triage::RawClassification::new(1, "Severe Fracture", "", 0.95);
    let assessment = engine().score(&raw);
    assert_eq!(assessment.final_severity, 5);
    assert_eq!(
        assessment.escalation_reason,
        "Critical keyword: \"severe fracture\""
    );
}

#[test]
fn nan_confidence_is_treated_as_low() {
    let assessment = engine().score(&with_description(2, NEUTRAL_DESCRIPTION, f64::NAN));
    assert_eq!(assessment.final_severity, 3);
    assert_eq!(assessment.confidence_level, 0);
}

#[test]
fn scoring_is_deterministic() {
    let engine = engine();
    let raw = laceration();
    assert_eq!(engine.score(&raw), engine.score(&raw));
}

#[test]
fn label_and_urgency_depend_only_on_final_severity() {
    let engine = engine();
    let first = engine.score(&uncertain_bruise());
    let second = engine.score(&with_description(2, NEUTRAL_DESCRIPTION, 0.9));

    assert_eq!(first.final_severity, second.final_severity);
    assert_eq!(first.severity_label, second.severity_label);
    assert_eq!(severity_label(first.final_severity), first.severity_label);
    assert_eq!(
        urgency_for(first.final_severity),
        urgency_for(second.final_severity)
    );
}

#[test]
fn low_confidence_margin_applies_to_the_unclamped_raw_severity() {
    let engine = engine();
    for severity in [0, -3] {
        let assessment = engine.score(&with_description(severity, NEUTRAL_DESCRIPTION, 0.3));
        assert_eq!(assessment.raw_severity, severity);
        assert_eq!(assessment.final_severity, 1, "raw severity {severity}");
        assert_eq!(assessment.severity_label, "Minor");
        assert_eq!(assessment.escalation_reason, "Low confidence score");
        assert!(!assessment.escalated);
    }
}

#[test]
fn empty_classifier_document_scores_as_minor() {
    let raw = crate::triage::RawClassification::from_json("{}").expect("empty object parses");

    let assessment = engine().score(&raw);

    assert_eq!(assessment.raw_severity, 0);
    assert_eq!(assessment.final_severity, 1);
    assert_eq!(assessment.severity_label, "Minor");
    assert_eq!(assessment.escalation_reason, "Low confidence score");
}

#[test]
fn keyword_floor_applies_to_missing_severity() {
    let assessment = engine().score(&with_description(0, "open wound on shin", 0.9));
    assert_eq!(assessment.final_severity, 4);
    assert!(assessment.escalated);
}
