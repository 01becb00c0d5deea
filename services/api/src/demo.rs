use crate::infra::{parse_instant, tracking_registry};
use chrono::{DateTime, Utc};
use clap::Args;
use fra_portal::config::AppConfig;
use fra_portal::error::AppError;
use fra_portal::workflows::tracking::{
    find_application, write_status_report, ApplicationReceipt, TrackingRegistry,
};
use fra_portal::workflows::wizard::{
    missing_required, step_caption, ApplicationIdentifier, Clock, DocumentKind, FieldUpdate,
    FixedClock, Gender, SchemeId, SessionStatus, SupportedState, SystemClock, UploadPolicy,
    WizardEvent, WizardHost, WizardSession,
};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Submission instant (RFC 3339). Defaults to now.
    #[arg(long, value_parser = crate::infra::parse_instant)]
    pub(crate) submitted_at: Option<FixedClock>,
    /// Press Previous on the first step instead of submitting.
    #[arg(long)]
    pub(crate) leave_early: bool,
}

#[derive(Args, Debug)]
pub(crate) struct TrackArgs {
    /// Application id, e.g. FRA123456
    pub(crate) application_id: String,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ReportArgs {
    /// Write the CSV to this path instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

/// Prints wizard signals the way a screen host would react to them.
#[derive(Debug)]
struct ConsoleHost {
    clock: FixedClock,
    receipt: Option<ApplicationReceipt>,
    left: bool,
}

impl WizardHost for ConsoleHost {
    fn go_back(&mut self) {
        self.left = true;
        println!("\nCitizen returned to the portal home page.");
    }

    fn complete(&mut self, application_id: ApplicationIdentifier) {
        let issued_on = DateTime::<Utc>::from_timestamp_millis(self.clock.now_millis())
            .map(|instant| instant.date_naive())
            .unwrap_or_default();
        let receipt = ApplicationReceipt::new(application_id, issued_on);
        println!("\nApplication submitted successfully: {}", receipt.application_id);
        println!("Receipt file: {}\n", receipt.file_name);
        print!("{}", receipt.body);
        self.receipt = Some(receipt);
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        submitted_at,
        leave_early,
    } = args;
    let clock = submitted_at.unwrap_or_else(|| FixedClock(SystemClock.now_millis()));
    let host = ConsoleHost {
        clock,
        receipt: None,
        left: false,
    };
    let mut session = WizardSession::new(host, clock);

    println!("FRA citizen application wizard demo");

    if leave_early {
        print_progress(&session);
        report_status(session.dispatch(WizardEvent::Previous));
        return Ok(());
    }

    for event in basic_info() {
        session.dispatch(event);
    }
    print_progress(&session);
    report_status(session.dispatch(WizardEvent::Next));

    for event in additional_info() {
        session.dispatch(event);
    }
    print_progress(&session);
    report_status(session.dispatch(WizardEvent::Next));

    print_progress(&session);
    let uploads = UploadPolicy::standard();
    for (kind, file_name) in [
        (DocumentKind::IdentityCard, "aadhaar-card.pdf"),
        (DocumentKind::CasteCertificate, "caste-certificate.jpg"),
    ] {
        match uploads.check(file_name, None) {
            Ok(reference) => {
                println!("  uploaded {} as {}", file_name, reference.content_type);
                session.dispatch(WizardEvent::AttachDocument { kind, reference });
            }
            Err(err) => println!("  upload rejected: {err}"),
        }
    }
    print_progress(&session);
    report_status(session.dispatch(WizardEvent::Next));

    for scheme in [
        SchemeId::ForestRightsAct2006,
        SchemeId::PmKisan,
        SchemeId::PmKisan,
        SchemeId::JalJeevanMission,
    ] {
        session.dispatch(WizardEvent::ToggleScheme(scheme));
    }
    if let Some(state) = session.state() {
        let selected: Vec<&str> = state
            .draft
            .selected_schemes
            .iter()
            .map(|scheme| scheme.name())
            .collect();
        println!("  selected schemes: {}", selected.join(", "));
    }
    print_progress(&session);
    report_status(session.dispatch(WizardEvent::Next));

    // Closed sessions ignore further input.
    report_status(session.dispatch(WizardEvent::Next));
    Ok(())
}

fn basic_info() -> Vec<WizardEvent> {
    vec![
        WizardEvent::SetField(FieldUpdate::FullName("Asha Devi".to_string())),
        WizardEvent::SetField(FieldUpdate::NationalId("1234 5678 9012".to_string())),
        WizardEvent::SetField(FieldUpdate::Mobile("9876543210".to_string())),
        WizardEvent::SetField(FieldUpdate::DateOfBirth("1985-03-12".to_string())),
        WizardEvent::SetField(FieldUpdate::Gender(Gender::Female)),
        WizardEvent::SetField(FieldUpdate::FatherName("Ramesh Singh".to_string())),
    ]
}

fn additional_info() -> Vec<WizardEvent> {
    vec![
        WizardEvent::SetField(FieldUpdate::Address("Ward 4, Main Road".to_string())),
        WizardEvent::SetField(FieldUpdate::Village("Kotra".to_string())),
        WizardEvent::SetField(FieldUpdate::District("Dindori".to_string())),
        WizardEvent::SetField(FieldUpdate::State(SupportedState::MadhyaPradesh)),
        WizardEvent::SetField(FieldUpdate::PostalCode("481880".to_string())),
        WizardEvent::SetField(FieldUpdate::Caste("Gond".to_string())),
    ]
}

fn print_progress<H, C>(session: &WizardSession<H, C>)
where
    H: WizardHost,
    C: Clock,
{
    let Some(state) = session.state() else {
        return;
    };
    println!("\n{}", step_caption(state.step));
    let missing = missing_required(&state.draft, state.step);
    if missing.is_empty() {
        println!("  all required inputs provided");
        return;
    }
    for field in &missing.fields {
        println!("  still empty: {}", field.key());
    }
    for kind in &missing.documents {
        println!("  document missing: {}", kind.label());
    }
}

fn report_status(status: SessionStatus) {
    match status {
        SessionStatus::Active(step) => println!("  -> moved to step {}", step.number()),
        SessionStatus::Exited => println!("  -> wizard exited"),
        SessionStatus::Completed => println!("  -> wizard completed"),
        SessionStatus::Closed => println!("  -> wizard already closed, event ignored"),
    }
}

pub(crate) fn run_track(args: TrackArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let registry = tracking_registry(&config.portal);
    let application = find_application(registry.as_ref(), &args.application_id)?;
    let view = application.status_view();

    println!("Application {}", view.application.application_id);
    println!("Applicant: {}", view.application.applicant_name);
    println!(
        "Submitted on: {}",
        view.application.submitted_on.format("%d/%m/%Y")
    );
    println!("Status: {}", view.status_label);
    println!("Schemes: {}", view.application.schemes.join(", "));
    println!("Officer remarks: {}", view.application.officer_remarks);

    println!("\nTimeline");
    for entry in &view.timeline {
        let mark = if entry.completed { "x" } else { " " };
        println!("  [{mark}] {}", entry.label);
    }

    if let Some(coordinates) = view.application.land_coordinates {
        println!(
            "\nLand parcel: {:.4}, {:.4}",
            coordinates.lat, coordinates.lng
        );
    }
    Ok(())
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let registry = tracking_registry(&config.portal);
    let applications = registry.all()?;

    match args.output {
        Some(path) => {
            let file = File::create(&path)?;
            write_status_report(&applications, file)?;
            println!(
                "Wrote {} applications to {}",
                applications.len(),
                path.display()
            );
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_status_report(&applications, &mut handle)?;
            handle.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host_at(millis: i64) -> ConsoleHost {
        ConsoleHost {
            clock: FixedClock(millis),
            receipt: None,
            left: false,
        }
    }

    #[test]
    fn scripted_walk_completes_with_receipt() {
        let clock = parse_instant("2025-01-16T07:25:45.678Z").expect("valid instant");
        let mut session = WizardSession::new(host_at(clock.0), clock);

        for event in basic_info()
            .into_iter()
            .chain([WizardEvent::Next])
            .chain(additional_info())
            .chain([
                WizardEvent::Next,
                WizardEvent::Next,
                WizardEvent::ToggleScheme(SchemeId::ForestRightsAct2006),
            ])
        {
            assert!(matches!(session.dispatch(event), SessionStatus::Active(_)));
        }

        assert_eq!(session.dispatch(WizardEvent::Next), SessionStatus::Completed);
        let host = session.into_host();
        let receipt = host.receipt.expect("receipt issued");
        assert_eq!(receipt.application_id.as_str(), "FRA345678");
        assert!(!host.left);
    }

    #[test]
    fn previous_on_first_step_leaves_once() {
        let mut session = WizardSession::new(host_at(0), FixedClock(0));
        assert_eq!(session.dispatch(WizardEvent::Previous), SessionStatus::Exited);
        assert_eq!(session.dispatch(WizardEvent::Previous), SessionStatus::Closed);
        let host = session.into_host();
        assert!(host.left);
        assert!(host.receipt.is_none());
    }

    #[test]
    fn report_writes_csv_file() {
        let path = std::env::temp_dir().join(format!(
            "fra-status-report-{}.csv",
            std::process::id()
        ));
        run_report(ReportArgs {
            output: Some(path.clone()),
        })
        .expect("report written");
        let written = std::fs::read_to_string(&path).expect("report readable");
        std::fs::remove_file(&path).ok();
        assert!(written.starts_with("Application ID,Applicant,Submitted On,Status"));
    }
}
