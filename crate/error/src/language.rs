/// Which language(s) diagnostic messages are rendered in.
///
/// Selected once per compilation/run (spec §6); threaded down through every
/// phase's error construction so a single source of truth decides how
/// `LocalizedMessage`s render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorLanguage {
    English,
    Hindi,
    #[default]
    Bilingual,
}

/// A diagnostic message carried in both languages so the `ErrorLanguage`
/// setting can pick (or combine) them at report time without re-deriving
/// either string.
#[derive(Debug, Clone)]
pub struct LocalizedMessage {
    pub en: String,
    pub hi: String,
}

impl LocalizedMessage {
    pub fn new(en: impl Into<String>, hi: impl Into<String>) -> Self {
        LocalizedMessage {
            en: en.into(),
            hi: hi.into(),
        }
    }

    pub fn render(&self, lang: ErrorLanguage) -> String {
        match lang {
            ErrorLanguage::English => self.en.clone(),
            ErrorLanguage::Hindi => self.hi.clone(),
            ErrorLanguage::Bilingual => format!("{} / {}", self.en, self.hi),
        }
    }
}

impl std::fmt::Display for LocalizedMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render(ErrorLanguage::Bilingual))
    }
}
