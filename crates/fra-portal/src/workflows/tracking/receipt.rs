use chrono::NaiveDate;
use serde::Serialize;

use crate::workflows::wizard::ApplicationIdentifier;

/// Acknowledgement handed to the citizen right after submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationReceipt {
    pub application_id: ApplicationIdentifier,
    pub issued_on: NaiveDate,
    pub status: &'static str,
    pub file_name: String,
    pub body: String,
}

impl ApplicationReceipt {
    pub fn new(application_id: ApplicationIdentifier, issued_on: NaiveDate) -> Self {
        let file_name = format!("receipt_{application_id}.txt");
        let body = render(&application_id, issued_on);
        Self {
            application_id,
            issued_on,
            status: "Submitted",
            file_name,
            body,
        }
    }
}

fn render(application_id: &ApplicationIdentifier, issued_on: NaiveDate) -> String {
    let mut out = String::new();
    out.push_str("आवेदन रसीद / Application Receipt\n");
    out.push_str("================================\n");
    out.push_str(&format!(
        "आवेदन संख्या / Application ID: {application_id}\n"
    ));
    out.push_str(&format!(
        "दिनांक / Date: {}\n",
        issued_on.format("%d/%m/%Y")
    ));
    out.push_str("स्थिति / Status: जमा किया गया / Submitted\n\n");
    out.push_str("कृपया इस संख्या को भविष्य के लिए संभाल कर रखें।\n");
    out.push_str("Please keep this ID safe for future reference.\n\n");
    out.push_str("जनजातीय मामले मंत्रालय, भारत सरकार\n");
    out.push_str("Ministry of Tribal Affairs, Government of India\n");
    out
}
