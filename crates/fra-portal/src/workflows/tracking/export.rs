use std::io::Write;

use serde::Serialize;

use super::domain::TrackedApplication;

#[derive(Debug, Serialize)]
struct StatusReportRow<'a> {
    #[serde(rename = "Application ID")]
    application_id: &'a str,
    #[serde(rename = "Applicant")]
    applicant: &'a str,
    #[serde(rename = "Submitted On")]
    submitted_on: String,
    #[serde(rename = "Status")]
    status: &'static str,
    #[serde(rename = "Schemes")]
    schemes: String,
    #[serde(rename = "Officer Remarks")]
    remarks: &'a str,
}

/// Write the application status report as CSV, one row per application.
pub fn write_status_report<W: Write>(
    applications: &[TrackedApplication],
    writer: W,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for application in applications {
        csv_writer.serialize(StatusReportRow {
            application_id: application.application_id.as_str(),
            applicant: &application.applicant_name,
            submitted_on: application.submitted_on.format("%Y-%m-%d").to_string(),
            status: application.status.label(),
            schemes: application.schemes.join("; "),
            remarks: &application.officer_remarks,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn status_report_csv(applications: &[TrackedApplication]) -> Result<String, csv::Error> {
    let mut buffer = Vec::new();
    write_status_report(applications, &mut buffer)?;
    String::from_utf8(buffer).map_err(|err| {
        csv::Error::from(std::io::Error::new(std::io::ErrorKind::InvalidData, err))
    })
}
