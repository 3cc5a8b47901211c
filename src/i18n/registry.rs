//! Language catalog: the fixed set of languages content can be generated in.
//!
//! The catalog is built once from static data and is read-only afterwards. It
//! uses a singleton pattern with `OnceLock`, like the rest of the i18n module,
//! and keeps three views of the same records:
//!
//! - the flat list in display order
//! - a code index for constant-time lookups
//! - the grouping by family, in first-seen order of families and languages

use anyhow::{bail, Result};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

/// A single language offered by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageRecord {
    /// Stable identifier sent to the generation service (e.g., "en", "zh-TW", "ceb")
    pub code: &'static str,

    /// English display name (e.g., "French")
    pub name: &'static str,

    /// Name of the language in the language itself (e.g., "Français")
    pub native_name: &'static str,

    /// Classification label used to group languages in pickers (e.g., "Indo-European")
    pub family: &'static str,
}

impl LanguageRecord {
    pub const fn new(
        code: &'static str,
        name: &'static str,
        native_name: &'static str,
        family: &'static str,
    ) -> Self {
        Self {
            code,
            name,
            native_name,
            family,
        }
    }

    /// Picker label, e.g. "French (Français)".
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.native_name)
    }
}

/// One family bucket of the grouped view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageFamily<'a> {
    pub name: &'static str,
    pub languages: Vec<&'a LanguageRecord>,
}

/// Result of checking a list of codes against the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodePartition {
    /// Codes found in the catalog, in input order
    pub known: Vec<String>,
    /// Codes not found in the catalog, in input order
    pub unknown: Vec<String>,
}

/// Ordered, immutable set of languages.
#[derive(Debug)]
pub struct LanguageCatalog {
    languages: Vec<LanguageRecord>,
    index: HashMap<&'static str, usize>,
    families: Vec<(&'static str, Vec<usize>)>,
}

/// Global catalog instance (initialized lazily)
static CATALOG: OnceLock<LanguageCatalog> = OnceLock::new();

impl LanguageCatalog {
    /// Get the built-in catalog.
    ///
    /// The catalog is assembled on first call; every later call returns the
    /// same instance.
    pub fn get() -> &'static LanguageCatalog {
        CATALOG.get_or_init(|| Self::assemble(BUILTIN_LANGUAGES.to_vec()))
    }

    /// Build a catalog from an arbitrary ordered list of records.
    ///
    /// # Errors
    /// Fails if two records share a code.
    pub fn from_records(records: Vec<LanguageRecord>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.code) {
                bail!("Duplicate language code in catalog: '{}'", record.code);
            }
        }
        Ok(Self::assemble(records))
    }

    fn assemble(languages: Vec<LanguageRecord>) -> Self {
        let mut index = HashMap::with_capacity(languages.len());
        let mut families: Vec<(&'static str, Vec<usize>)> = Vec::new();

        for (position, record) in languages.iter().enumerate() {
            index.insert(record.code, position);

            match families.iter_mut().find(|(name, _)| *name == record.family) {
                Some((_, members)) => members.push(position),
                None => families.push((record.family, vec![position])),
            }
        }

        Self {
            languages,
            index,
            families,
        }
    }

    /// All records in display order.
    pub fn list_all(&self) -> &[LanguageRecord] {
        &self.languages
    }

    /// Records grouped by family.
    ///
    /// Families appear in the order their first member appears in
    /// [`list_all`](Self::list_all); members keep their relative order.
    pub fn group_by_family(&self) -> Vec<LanguageFamily<'_>> {
        self.families
            .iter()
            .map(|(name, members)| LanguageFamily {
                name: *name,
                languages: members.iter().map(|&i| &self.languages[i]).collect(),
            })
            .collect()
    }

    /// Look up a record by its code.
    ///
    /// `None` is not an error: callers display the raw code instead
    /// (see [`display_name`](Self::display_name)).
    pub fn resolve(&self, code: &str) -> Option<&LanguageRecord> {
        self.index.get(code).map(|&i| &self.languages[i])
    }

    /// English name for a code, or the code itself when unknown.
    pub fn display_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.resolve(code).map(|record| record.name).unwrap_or(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Split codes into those the catalog knows and those it doesn't.
    pub fn partition_codes<I, S>(&self, codes: I) -> CodePartition
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut partition = CodePartition::default();
        for code in codes {
            let code = code.as_ref();
            if self.contains(code) {
                partition.known.push(code.to_string());
            } else {
                partition.unknown.push(code.to_string());
            }
        }
        partition
    }
}

/// Built-in language list, in display order.
static BUILTIN_LANGUAGES: &[LanguageRecord] = &[
    // Indo-European
    LanguageRecord::new("en", "English", "English", "Indo-European"),
    LanguageRecord::new("fr", "French", "Français", "Indo-European"),
    LanguageRecord::new("pt", "Portuguese", "Português", "Indo-European"),
    LanguageRecord::new("de", "German", "Deutsch", "Indo-European"),
    LanguageRecord::new("ro", "Romanian", "Română", "Indo-European"),
    LanguageRecord::new("sv", "Swedish", "Svenska", "Indo-European"),
    LanguageRecord::new("da", "Danish", "Dansk", "Indo-European"),
    LanguageRecord::new("bg", "Bulgarian", "Български", "Indo-European"),
    LanguageRecord::new("ru", "Russian", "Русский", "Indo-European"),
    LanguageRecord::new("cs", "Czech", "Čeština", "Indo-European"),
    LanguageRecord::new("el", "Greek", "Ελληνικά", "Indo-European"),
    LanguageRecord::new("uk", "Ukrainian", "Українська", "Indo-European"),
    LanguageRecord::new("es", "Spanish", "Español", "Indo-European"),
    LanguageRecord::new("nl", "Dutch", "Nederlands", "Indo-European"),
    LanguageRecord::new("sk", "Slovak", "Slovenčina", "Indo-European"),
    LanguageRecord::new("hr", "Croatian", "Hrvatski", "Indo-European"),
    LanguageRecord::new("pl", "Polish", "Polski", "Indo-European"),
    LanguageRecord::new("lt", "Lithuanian", "Lietuvių", "Indo-European"),
    LanguageRecord::new("nb", "Norwegian Bokmål", "Norsk Bokmål", "Indo-European"),
    LanguageRecord::new("nn", "Norwegian Nynorsk", "Norsk Nynorsk", "Indo-European"),
    LanguageRecord::new("fa", "Persian", "فارسی", "Indo-European"),
    LanguageRecord::new("sl", "Slovenian", "Slovenščina", "Indo-European"),
    LanguageRecord::new("gu", "Gujarati", "ગુજરાતી", "Indo-European"),
    LanguageRecord::new("lv", "Latvian", "Latviešu", "Indo-European"),
    LanguageRecord::new("it", "Italian", "Italiano", "Indo-European"),
    LanguageRecord::new("oc", "Occitan", "Occitan", "Indo-European"),
    LanguageRecord::new("ne", "Nepali", "नेपाली", "Indo-European"),
    LanguageRecord::new("mr", "Marathi", "मराठी", "Indo-European"),
    LanguageRecord::new("be", "Belarusian", "Беларуская", "Indo-European"),
    LanguageRecord::new("sr", "Serbian", "Српски", "Indo-European"),
    LanguageRecord::new("lb", "Luxembourgish", "Lëtzebuergesch", "Indo-European"),
    LanguageRecord::new("vec", "Venetian", "Vèneto", "Indo-European"),
    LanguageRecord::new("as", "Assamese", "অসমীয়া", "Indo-European"),
    LanguageRecord::new("cy", "Welsh", "Cymraeg", "Indo-European"),
    LanguageRecord::new("szl", "Silesian", "Ślōnski", "Indo-European"),
    LanguageRecord::new("ast", "Asturian", "Asturianu", "Indo-European"),
    LanguageRecord::new("hne", "Chhattisgarhi", "छत्तीसगढ़ी", "Indo-European"),
    LanguageRecord::new("awa", "Awadhi", "अवधी", "Indo-European"),
    LanguageRecord::new("mai", "Maithili", "मैथिली", "Indo-European"),
    LanguageRecord::new("bho", "Bhojpuri", "भोजपुरी", "Indo-European"),
    LanguageRecord::new("sd", "Sindhi", "سنڌي", "Indo-European"),
    LanguageRecord::new("ga", "Irish", "Gaeilge", "Indo-European"),
    LanguageRecord::new("fo", "Faroese", "Føroyskt", "Indo-European"),
    LanguageRecord::new("hi", "Hindi", "हिन्दी", "Indo-European"),
    LanguageRecord::new("pa", "Punjabi", "ਪੰਜਾਬੀ", "Indo-European"),
    LanguageRecord::new("bn", "Bengali", "বাংলা", "Indo-European"),
    LanguageRecord::new("or", "Oriya", "ଓଡ଼ିଆ", "Indo-European"),
    LanguageRecord::new("tg", "Tajik", "Тоҷикӣ", "Indo-European"),
    LanguageRecord::new("yi", "Eastern Yiddish", "ייִדיש", "Indo-European"),
    LanguageRecord::new("lmo", "Lombard", "Lumbaart", "Indo-European"),
    LanguageRecord::new("lij", "Ligurian", "Ligure", "Indo-European"),
    LanguageRecord::new("scn", "Sicilian", "Sicilianu", "Indo-European"),
    LanguageRecord::new("fur", "Friulian", "Furlan", "Indo-European"),
    LanguageRecord::new("sc", "Sardinian", "Sardu", "Indo-European"),
    LanguageRecord::new("gl", "Galician", "Galego", "Indo-European"),
    LanguageRecord::new("ca", "Catalan", "Català", "Indo-European"),
    LanguageRecord::new("is", "Icelandic", "Íslenska", "Indo-European"),
    LanguageRecord::new("sq", "Albanian", "Shqip", "Indo-European"),
    LanguageRecord::new("li", "Limburgish", "Limburgs", "Indo-European"),
    LanguageRecord::new("prs", "Dari", "دری", "Indo-European"),
    LanguageRecord::new("af", "Afrikaans", "Afrikaans", "Indo-European"),
    LanguageRecord::new("mk", "Macedonian", "Македонски", "Indo-European"),
    LanguageRecord::new("si", "Sinhala", "සිංහල", "Indo-European"),
    LanguageRecord::new("ur", "Urdu", "اردو", "Indo-European"),
    LanguageRecord::new("mag", "Magahi", "मगही", "Indo-European"),
    LanguageRecord::new("bs", "Bosnian", "Bosanski", "Indo-European"),
    LanguageRecord::new("hy", "Armenian", "Հայերեն", "Indo-European"),
    // Sino-Tibetan
    LanguageRecord::new("zh", "Chinese (Simplified)", "简体中文", "Sino-Tibetan"),
    LanguageRecord::new("zh-TW", "Chinese (Traditional)", "繁體中文", "Sino-Tibetan"),
    LanguageRecord::new("yue", "Cantonese", "粵語", "Sino-Tibetan"),
    LanguageRecord::new("my", "Burmese", "မြန်မာ", "Sino-Tibetan"),
    // Afro-Asiatic
    LanguageRecord::new("ar", "Arabic (Standard)", "العربية", "Afro-Asiatic"),
    LanguageRecord::new("ar-SA", "Arabic (Najdi)", "العربية النجدية", "Afro-Asiatic"),
    LanguageRecord::new("ar-LB", "Arabic (Levantine)", "العربية الشامية", "Afro-Asiatic"),
    LanguageRecord::new("ar-EG", "Arabic (Egyptian)", "العربية المصرية", "Afro-Asiatic"),
    LanguageRecord::new("ar-MA", "Arabic (Moroccan)", "العربية المغربية", "Afro-Asiatic"),
    LanguageRecord::new("ar-IQ", "Arabic (Mesopotamian)", "العربية العراقية", "Afro-Asiatic"),
    LanguageRecord::new("ar-YE", "Arabic (Ta'izzi-Adeni)", "العربية اليمنية", "Afro-Asiatic"),
    LanguageRecord::new("ar-TN", "Arabic (Tunisian)", "العربية التونسية", "Afro-Asiatic"),
    LanguageRecord::new("he", "Hebrew", "עברית", "Afro-Asiatic"),
    LanguageRecord::new("mt", "Maltese", "Malti", "Afro-Asiatic"),
    // Austronesian
    LanguageRecord::new("id", "Indonesian", "Bahasa Indonesia", "Austronesian"),
    LanguageRecord::new("ms", "Malay", "Bahasa Melayu", "Austronesian"),
    LanguageRecord::new("tl", "Tagalog", "Tagalog", "Austronesian"),
    LanguageRecord::new("ceb", "Cebuano", "Cebuano", "Austronesian"),
    LanguageRecord::new("jv", "Javanese", "Basa Jawa", "Austronesian"),
    LanguageRecord::new("su", "Sundanese", "Basa Sunda", "Austronesian"),
    LanguageRecord::new("min", "Minangkabau", "Baso Minangkabau", "Austronesian"),
    LanguageRecord::new("ban", "Balinese", "Basa Bali", "Austronesian"),
    LanguageRecord::new("bjn", "Banjar", "Bahasa Banjar", "Austronesian"),
    LanguageRecord::new("pag", "Pangasinan", "Salitan Pangasinan", "Austronesian"),
    LanguageRecord::new("ilo", "Iloko", "Pagsasao nga Ilokano", "Austronesian"),
    LanguageRecord::new("war", "Waray", "Winaray", "Austronesian"),
    // Dravidian
    LanguageRecord::new("ta", "Tamil", "தமிழ்", "Dravidian"),
    LanguageRecord::new("te", "Telugu", "తెలుగు", "Dravidian"),
    LanguageRecord::new("kn", "Kannada", "ಕನ್ನಡ", "Dravidian"),
    LanguageRecord::new("ml", "Malayalam", "മലയാളം", "Dravidian"),
    // Turkic
    LanguageRecord::new("tr", "Turkish", "Türkçe", "Turkic"),
    LanguageRecord::new("az", "Azerbaijani", "Azərbaycan", "Turkic"),
    LanguageRecord::new("uz", "Uzbek", "Oʻzbek", "Turkic"),
    LanguageRecord::new("kk", "Kazakh", "Қазақша", "Turkic"),
    LanguageRecord::new("ba", "Bashkir", "Башҡорт", "Turkic"),
    LanguageRecord::new("tt", "Tatar", "Татар", "Turkic"),
    // Tai-Kadai
    LanguageRecord::new("th", "Thai", "ไทย", "Tai-Kadai"),
    LanguageRecord::new("lo", "Lao", "ລາວ", "Tai-Kadai"),
    // Uralic
    LanguageRecord::new("fi", "Finnish", "Suomi", "Uralic"),
    LanguageRecord::new("et", "Estonian", "Eesti", "Uralic"),
    LanguageRecord::new("hu", "Hungarian", "Magyar", "Uralic"),
    // Austroasiatic
    LanguageRecord::new("vi", "Vietnamese", "Tiếng Việt", "Austroasiatic"),
    LanguageRecord::new("km", "Khmer", "ខ្មែរ", "Austroasiatic"),
    // Japonic
    LanguageRecord::new("ja", "Japanese", "日本語", "Japonic"),
    // Koreanic
    LanguageRecord::new("ko", "Korean", "한국어", "Koreanic"),
    // Kartvelian
    LanguageRecord::new("ka", "Georgian", "ქართული", "Kartvelian"),
    // Language Isolate
    LanguageRecord::new("eu", "Basque", "Euskera", "Language Isolate"),
    // Creole
    LanguageRecord::new("ht", "Haitian", "Kreyòl Ayisyen", "Creole"),
    LanguageRecord::new("pap", "Papiamento", "Papiamentu", "Creole"),
    LanguageRecord::new("kea", "Kabuverdianu", "Kriolu", "Creole"),
    LanguageRecord::new("tpi", "Tok Pisin", "Tok Pisin", "Creole"),
    // Niger-Congo
    LanguageRecord::new("sw", "Swahili", "Kiswahili", "Niger-Congo"),
];
