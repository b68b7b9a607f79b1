use crate::infra::read_classification;
use clap::{Args, ValueEnum};
use first_aid_triage::error::AppError;
use first_aid_triage::triage::{
    InMemorySessionStore, NoopSessionStore, RawClassification, SessionStore, StoredSession,
    TriageEngine, TriageReport, TriageService,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

const CLI_CLIENT: &str = concat!("first-aid-triage-cli/", env!("CARGO_PKG_VERSION"));

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Classifier JSON document to rescore (`-` reads stdin)
    #[arg(long, default_value = "-")]
    pub(crate) input: PathBuf,
    /// Print the full report as JSON instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Run a single scenario instead of all of them
    #[arg(long, value_enum)]
    pub(crate) scenario: Option<DemoScenario>,
    /// Print each report as JSON instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum DemoScenario {
    Scrape,
    Laceration,
    UnconsciousBurn,
    UncertainBruise,
}

impl DemoScenario {
    const ALL: [Self; 4] = [
        Self::Scrape,
        Self::Laceration,
        Self::UnconsciousBurn,
        Self::UncertainBruise,
    ];

    fn title(self) -> &'static str {
        match self {
            Self::Scrape => "Minor scrape, confident classifier",
            Self::Laceration => "Laceration understated by the classifier",
            Self::UnconsciousBurn => "Burn with an unconscious patient",
            Self::UncertainBruise => "Bruise with a low-confidence classification",
        }
    }

    fn classification(self) -> RawClassification {
        match self {
            Self::Scrape => RawClassification::new(1, "small scrape", "minor scrape on knee", 0.9)
                .with_steps(["Clean with water"]),
            Self::Laceration => {
                RawClassification::new(1, "Laceration", "deep cut on arm with bleeding", 0.8)
                    .with_steps(Vec::<String>::new())
            }
            Self::UnconsciousBurn => RawClassification::new(
                2,
                "Burn",
                "patient unconscious with severe burn",
                0.9,
            )
            .with_steps(["Check breathing", "Cool the burn with running water"]),
            Self::UncertainBruise => RawClassification::new(1, "Bruise", "small bruise", 0.3),
        }
    }
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs { input, json } = args;

    let raw = read_classification(&input)?;
    let service = TriageService::new(TriageEngine::standard(), Arc::new(NoopSessionStore));
    let report = service.assess(&raw, CLI_CLIENT);

    print_report(&report, json)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { scenario, json } = args;

    let sessions = Arc::new(InMemorySessionStore::new("demo", 16));
    let service = TriageService::new(TriageEngine::standard(), sessions.clone());

    let scenarios = match scenario {
        Some(scenario) => vec![scenario],
        None => DemoScenario::ALL.to_vec(),
    };

    println!("First-aid triage demo");
    for scenario in scenarios {
        println!("\n=== {} ===", scenario.title());
        let report = service.assess(&scenario.classification(), CLI_CLIENT);
        print_report(&report, json)?;
    }

    let logged = logged_sessions(sessions.as_ref(), DemoScenario::ALL.len());
    println!("\nSessions logged: {}", logged.len());
    for session in logged.iter().rev() {
        println!(
            "- {} | {} ({}) | escalated {}",
            session.id, session.record.injury_type, session.record.severity_label,
            session.record.escalated
        );
    }

    Ok(())
}

fn logged_sessions<S: SessionStore>(store: &S, limit: usize) -> Vec<StoredSession> {
    match store.recent(limit) {
        Ok(sessions) => sessions,
        Err(err) => {
            warn!(error = %err, "failed to list logged triage sessions");
            Vec::new()
        }
    }
}

fn print_report(report: &TriageReport, json: bool) -> Result<(), AppError> {
    if json {
        let rendered = serde_json::to_string_pretty(report)
            .map_err(|err| AppError::Io(std::io::Error::other(err)))?;
        println!("{rendered}");
    } else {
        render_report(report);
    }
    Ok(())
}

pub(crate) fn render_report(report: &TriageReport) {
    let assessment = &report.assessment;

    println!(
        "Injury: {} | severity {} ({}) | confidence {}%",
        assessment.injury_type,
        assessment.final_severity,
        assessment.severity_label,
        assessment.confidence_level
    );
    println!("{} {}", report.urgency.icon, report.urgency.text);

    if assessment.raw_severity != assessment.final_severity {
        println!(
            "Severity adjusted {} -> {}",
            assessment.raw_severity, assessment.final_severity
        );
    }
    if assessment.escalated {
        println!("Escalated: {}", assessment.escalation_reason);
    } else if !assessment.escalation_reason.is_empty() {
        println!("Adjustment note: {}", assessment.escalation_reason);
    }

    println!("\nAction plan");
    for (index, step) in report.first_aid_plan.steps().iter().enumerate() {
        println!("{}. {}", index + 1, step);
    }

    if !report.red_flags.is_empty() {
        println!("\nRed flags");
        for flag in &report.red_flags {
            println!("- {flag}");
        }
    }

    if !report.care_actions.is_empty() {
        let actions: Vec<_> = report
            .care_actions
            .iter()
            .map(|action| action.label())
            .collect();
        println!("\nNext steps: {}", actions.join(" | "));
    }

    println!("\nClassifier recommendation: {}", report.recommendation.label());
    println!("⚠️ {}", report.disclaimer);
}
