use hindustani_ir::SourceLocation;
use std::fmt;

/// The closed set of lexical categories the lexer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tokentype {
    Identifier,
    IntegerLiteral,
    FloatLiteral,
    StringLiteral,

    Maan,
    Likho,
    LikhoOnline,
    Poocho,
    Agar,
    WarnaAgar,
    Warna,
    JabTak,
    Har,
    Mein,
    Ruk,
    AageBadho,
    Kaam,
    Wapas,
    Lambda,
    Class,
    Extends,
    Naya,
    Yeh,
    Upar,
    Koshish,
    Pakad,
    Aakhir,
    Uchalo,
    Sach,
    Jhoot,
    Khaali,
    Nahi,
    Aur,
    Ya,
    Lao,

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Equal,
    EqualEqual,
    NotEqual,
    Greater,
    Less,
    GreaterEqual,
    LessEqual,
    Arrow,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Colon,

    Eof,
}

impl Tokentype {
    /// Maps a scanned identifier to its keyword token, or `None` for a plain
    /// identifier (spec §6 keyword table).
    pub fn keyword(identifier: &str) -> Option<Tokentype> {
        Some(match identifier {
            "maan" => Tokentype::Maan,
            "likho" => Tokentype::Likho,
            "likho_online" => Tokentype::LikhoOnline,
            "poocho" => Tokentype::Poocho,
            "agar" => Tokentype::Agar,
            "warna_agar" => Tokentype::WarnaAgar,
            "warna" => Tokentype::Warna,
            "jab_tak" => Tokentype::JabTak,
            "har" => Tokentype::Har,
            "mein" => Tokentype::Mein,
            "ruk" => Tokentype::Ruk,
            "age_badho" => Tokentype::AageBadho,
            "kaam" => Tokentype::Kaam,
            "wapas" => Tokentype::Wapas,
            "lambda" => Tokentype::Lambda,
            "class" => Tokentype::Class,
            "extends" => Tokentype::Extends,
            "naya" => Tokentype::Naya,
            "yeh" => Tokentype::Yeh,
            "upar" => Tokentype::Upar,
            "koshish" => Tokentype::Koshish,
            "pakad" => Tokentype::Pakad,
            "aakhir" => Tokentype::Aakhir,
            "uchalo" => Tokentype::Uchalo,
            "sach" => Tokentype::Sach,
            "jhoot" => Tokentype::Jhoot,
            "khaali" => Tokentype::Khaali,
            "nahi" => Tokentype::Nahi,
            "aur" => Tokentype::Aur,
            "ya" => Tokentype::Ya,
            "lao" => Tokentype::Lao,
            _ => return None,
        })
    }
}

impl fmt::Display for Tokentype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Tokentype::Identifier => "identifier",
            Tokentype::IntegerLiteral => "integer literal",
            Tokentype::FloatLiteral => "float literal",
            Tokentype::StringLiteral => "string literal",
            Tokentype::Maan => "'maan'",
            Tokentype::Likho => "'likho'",
            Tokentype::LikhoOnline => "'likho_online'",
            Tokentype::Poocho => "'poocho'",
            Tokentype::Agar => "'agar'",
            Tokentype::WarnaAgar => "'warna_agar'",
            Tokentype::Warna => "'warna'",
            Tokentype::JabTak => "'jab_tak'",
            Tokentype::Har => "'har'",
            Tokentype::Mein => "'mein'",
            Tokentype::Ruk => "'ruk'",
            Tokentype::AageBadho => "'age_badho'",
            Tokentype::Kaam => "'kaam'",
            Tokentype::Wapas => "'wapas'",
            Tokentype::Lambda => "'lambda'",
            Tokentype::Class => "'class'",
            Tokentype::Extends => "'extends'",
            Tokentype::Naya => "'naya'",
            Tokentype::Yeh => "'yeh'",
            Tokentype::Upar => "'upar'",
            Tokentype::Koshish => "'koshish'",
            Tokentype::Pakad => "'pakad'",
            Tokentype::Aakhir => "'aakhir'",
            Tokentype::Uchalo => "'uchalo'",
            Tokentype::Sach => "'sach'",
            Tokentype::Jhoot => "'jhoot'",
            Tokentype::Khaali => "'khaali'",
            Tokentype::Nahi => "'nahi'",
            Tokentype::Aur => "'aur'",
            Tokentype::Ya => "'ya'",
            Tokentype::Lao => "'lao'",
            Tokentype::Plus => "'+'",
            Tokentype::Minus => "'-'",
            Tokentype::Star => "'*'",
            Tokentype::Slash => "'/'",
            Tokentype::Percent => "'%'",
            Tokentype::Equal => "'='",
            Tokentype::EqualEqual => "'=='",
            Tokentype::NotEqual => "'!='",
            Tokentype::Greater => "'>'",
            Tokentype::Less => "'<'",
            Tokentype::GreaterEqual => "'>='",
            Tokentype::LessEqual => "'<='",
            Tokentype::Arrow => "'->'",
            Tokentype::LeftParen => "'('",
            Tokentype::RightParen => "')'",
            Tokentype::LeftBracket => "'['",
            Tokentype::RightBracket => "']'",
            Tokentype::LeftBrace => "'{'",
            Tokentype::RightBrace => "'}'",
            Tokentype::Comma => "','",
            Tokentype::Dot => "'.'",
            Tokentype::Colon => "':'",
            Tokentype::Eof => "<EOF>",
        };
        write!(f, "{s}")
    }
}

/// A single lexeme together with its source position.
#[derive(Debug, Clone)]
pub struct Token {
    pub token_type: Tokentype,
    pub lexeme: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(token_type: Tokentype, lexeme: impl Into<String>, location: SourceLocation) -> Self {
        Token {
            token_type,
            lexeme: lexeme.into(),
            location,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.token_type, self.lexeme)
    }
}
