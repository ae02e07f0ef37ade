use std::collections::BTreeMap;
use std::sync::OnceLock;

/// UI language of the portal and every grid inside it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Language {
    #[default]
    En,
    ZhHant,
}

struct Locale {
    language: Language,
    code: &'static str,
    label_key: &'static str,
    source: &'static str,
}

static LOCALES: [Locale; 2] = [
    Locale {
        language: Language::En,
        code: "en",
        label_key: "language.option.en",
        source: include_str!("../../assets/i18n/en.json"),
    },
    Locale {
        language: Language::ZhHant,
        code: "zh-Hant",
        label_key: "language.option.zh_hant",
        source: include_str!("../../assets/i18n/zh-Hant.json"),
    },
];

static ALL: [Language; 2] = [Language::En, Language::ZhHant];

static CATALOGS: [OnceLock<BTreeMap<String, String>>; 2] = [OnceLock::new(), OnceLock::new()];

impl Language {
    pub fn all() -> &'static [Self] {
        &ALL
    }

    fn locale(self) -> &'static Locale {
        &LOCALES[self as usize]
    }

    pub fn code(self) -> &'static str {
        self.locale().code
    }

    /// Catalog key of this language's name, shown in the language picker.
    pub fn label_key(self) -> &'static str {
        self.locale().label_key
    }

    pub fn from_code(code: &str) -> Option<Self> {
        LOCALES
            .iter()
            .find(|locale| locale.code == code)
            .map(|locale| locale.language)
    }
}

/// Translates `key`. Keys missing from `language` use the English text, and
/// keys missing everywhere come back unchanged.
pub fn tr(language: Language, key: &'static str) -> &'static str {
    lookup(language, key)
        .or_else(|| lookup(Language::En, key))
        .unwrap_or(key)
}

fn lookup(language: Language, key: &str) -> Option<&'static str> {
    let catalog = CATALOGS[language as usize].get_or_init(|| load_catalog(language.locale()));
    catalog.get(key).map(String::as_str)
}

fn load_catalog(locale: &Locale) -> BTreeMap<String, String> {
    match serde_json::from_str(locale.source) {
        Ok(catalog) => catalog,
        Err(err) => {
            log::error!("i18n catalog '{}' is not a flat string map: {err}", locale.code);
            BTreeMap::new()
        }
    }
}
