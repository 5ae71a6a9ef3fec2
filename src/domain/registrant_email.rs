use validator::validate_email;

#[derive(Debug, Clone, PartialEq)]
pub struct RegistrantEmail(String);

impl RegistrantEmail {
    pub fn parse(s: String) -> Result<RegistrantEmail, String> {
        let trimmed = s.trim();
        if validate_email(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(format!("{} is not a valid email address.", s))
        }
    }
}

impl AsRef<str> for RegistrantEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RegistrantEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
