//! The structured result of a completed session

/// Header token used to find the subject inside the body
pub const SUBJECT_HEADER: &str = "Subject:";

/// A message extracted from one SMTP session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Message {
    /// Address inside the brackets of `MAIL FROM:`
    pub from: String,

    /// Address inside the brackets of `RCPT TO:`
    pub to: String,

    /// Value of the first `Subject:` line of the body, or empty
    pub subject: String,

    /// Raw body lines, each with its original line terminator
    pub body: String,
}

impl Message {
    /// Create a message, deriving the subject from the body
    pub fn new(from: String, to: String, body: String) -> Self {
        let subject = extract_subject(&body);
        Self {
            from,
            to,
            subject,
            body,
        }
    }
}

/// Returns the trimmed value of the first body line starting with
/// `Subject:` (compared case-insensitively), or an empty string.
pub fn extract_subject(body: &str) -> String {
    body.split('\n')
        .find_map(|line| {
            let prefix = line.get(..SUBJECT_HEADER.len())?;
            prefix
                .eq_ignore_ascii_case(SUBJECT_HEADER)
                .then(|| line[SUBJECT_HEADER.len()..].trim().to_string())
        })
        .unwrap_or_default()
}
