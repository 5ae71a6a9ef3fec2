#[derive(Debug, Clone, PartialEq)]
pub struct RegistrantName(String);

impl RegistrantName {
    pub fn parse(s: String) -> Result<RegistrantName, String> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("name is empty.".to_string());
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl AsRef<str> for RegistrantName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RegistrantName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
