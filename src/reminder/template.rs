use crate::domain::RegistrantName;
use chrono::NaiveDate;

pub const SUBJECT: &str = "Reminder: Required Documents and Preparation for Blood Donation Test";

/// Renders a date the way registrants have always seen it, e.g. `Fri Feb 02 2024`.
pub fn format_test_date(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string()
}

/// The greeting stays on one line whatever the stored name contains.
fn greeting_name(name: &RegistrantName) -> String {
    name.as_ref()
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

pub fn render_body(name: &RegistrantName, test_date: NaiveDate) -> String {
    format!(
        "Dear {name},

Thank you for your willingness to donate blood and help save lives! As part of the process, we request you to kindly bring the following documents with you:

- Aadhar Card (or any valid government ID proof)
- Blood Type Proof (if available)

Additionally, we request you to come prepared for all the necessary tests to ensure you are eligible for blood donation.

**Details of the Test:**
- **Date:** {date}
- **Time:** Between 10:00 AM and 4:00 PM
- **Location:** [Insert location details]

Your commitment and generosity make a significant difference, and we truly appreciate your participation in this noble cause.

If you have any questions or need further assistance, please do not hesitate to contact us at [Insert Contact Information].

Looking forward to seeing you there!

Warm regards,
[Your Name]
[Your Designation]
[Your Organization]
[Your Contact Information]
",
        name = greeting_name(name),
        date = format_test_date(test_date),
    )
}
