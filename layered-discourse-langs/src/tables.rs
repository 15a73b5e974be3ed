//! Word lists per target language.
//!
//! Formality classes map a class name to the pronouns and possessives that
//! select it. Ambiguous pronouns map an English source pronoun to the target
//! forms whose choice depends on the antecedent. Ambiguous tenses are UD
//! `Tense` values.

use layered_discourse::LanguageProfile;

type WordClasses = &'static [(&'static str, &'static [&'static str])];

/// Static description of one built-in language.
pub(crate) struct LanguageTable {
    pub code: &'static str,
    pub formality: WordClasses,
    pub pronouns: Option<WordClasses>,
    pub verbform: &'static [&'static str],
}

impl LanguageTable {
    pub fn to_profile(&self) -> LanguageProfile {
        let mut profile = LanguageProfile::new(self.code).with_ambiguous_verbform(self.verbform);
        for (class, words) in self.formality {
            profile = profile.with_formality_class(class, words);
        }
        if let Some(pronouns) = self.pronouns {
            for (source, targets) in pronouns {
                profile = profile.with_ambiguous_pronoun(source, targets);
            }
        }
        profile
    }
}

const NONE: WordClasses = &[];

pub(crate) const ARABIC: LanguageTable = LanguageTable {
    code: "ar",
    formality: NONE,
    pronouns: Some(&[
        (
            "you",
            &["انت", "انتَ", "انتِ", "انتى", "أنتم", "أنتن", "انتو", "أنتما"],
        ),
        ("it", &["هو", "هي"]),
        ("they", &["هم", "هن", "هما"]),
        ("them", &["هم", "هن", "هما"]),
    ]),
    verbform: &[],
};

// Formal "Sie" is only told apart from "sie" by capitalization, which
// normalization removes.
pub(crate) const GERMAN: LanguageTable = LanguageTable {
    code: "de",
    formality: &[("t_class", &["du"]), ("v_class", &["sie"])],
    pronouns: Some(&[("it", &["er", "sie", "es"])]),
    verbform: &[],
};

pub(crate) const ENGLISH: LanguageTable = LanguageTable {
    code: "en",
    formality: NONE,
    pronouns: None,
    verbform: &[],
};

pub(crate) const SPANISH: LanguageTable = LanguageTable {
    code: "es",
    formality: &[
        (
            "t_class",
            &["tú", "tu", "tus", "ti", "contigo", "tuyo", "te", "tuya"],
        ),
        (
            "v_class",
            &["usted", "vosotros", "vuestro", "vuestra", "vuestras", "os"],
        ),
    ],
    pronouns: Some(&[
        ("it", &["él", "ella"]),
        ("they", &["ellos", "ellas"]),
        ("them", &["ellos", "ellas"]),
        ("this", &["ésta", "éste", "esto"]),
        ("that", &["esa", "ese"]),
        ("these", &["estos", "estas"]),
        ("those", &["aquellos", "aquellas", "ésos", "ésas"]),
    ]),
    verbform: &["Pqp", "Imp", "Fut"],
};

pub(crate) const FRENCH: LanguageTable = LanguageTable {
    code: "fr",
    formality: &[
        (
            "t_class",
            &[
                "tu", "ton", "ta", "tes", "toi", "te", "tien", "tiens", "tienne", "tiennes",
            ],
        ),
        ("v_class", &["vous", "votre", "vos"]),
    ],
    pronouns: Some(&[
        ("it", &["il", "elle", "lui"]),
        ("they", &["ils", "elles"]),
        ("them", &["ils", "elles"]),
        ("you", &["tu", "vous", "on"]),
        ("we", &["nous", "on"]),
        ("this", &["celle", "ceci"]),
        ("that", &["celle", "celui"]),
        ("these", &["celles", "ceux"]),
        ("those", &["celles", "ceux"]),
    ]),
    verbform: &["Pqp", "Imp", "Past"],
};

pub(crate) const HEBREW: LanguageTable = LanguageTable {
    code: "he",
    formality: NONE,
    pronouns: None,
    verbform: &["Pqp", "Imp", "Fut"],
};

pub(crate) const ITALIAN: LanguageTable = LanguageTable {
    code: "it",
    formality: &[
        ("t_class", &["tu", "tuo", "tua", "tuoi"]),
        ("v_class", &["lei", "suo", "sua", "suoi"]),
    ],
    pronouns: Some(&[
        ("it", &["esso", "essa"]),
        ("them", &["ellos", "ellas"]),
        ("this", &["questa", "questo"]),
        ("that", &["quella", "quello"]),
        ("these", &["queste", "questi"]),
        ("those", &["quelle", "quelli"]),
    ]),
    verbform: &["Pqp", "Imp", "Fut"],
};

pub(crate) const JAPANESE: LanguageTable = LanguageTable {
    code: "ja",
    formality: &[
        ("t_class", &["だ", "だっ", "じゃ", "だろう", "だけど"]),
        (
            "v_class",
            &[
                "ござい",
                "ます",
                "いらっしゃれ",
                "いらっしゃい",
                "ご覧",
                "伺い",
                "伺っ",
                "存知",
                "です",
                "まし",
            ],
        ),
    ],
    pronouns: Some(&[("i", &["私", "僕", "俺"])]),
    verbform: &[],
};

pub(crate) const KOREAN: LanguageTable = LanguageTable {
    code: "ko",
    formality: &[
        ("t_class", &["제가", "저희", "나"]),
        (
            "v_class",
            &[
                "댁에", "성함", "분", "생신", "식사", "연세", "병환", "약주", "자제분", "뵙다", "저",
            ],
        ),
    ],
    pronouns: None,
    verbform: &[],
};

pub(crate) const DUTCH: LanguageTable = LanguageTable {
    code: "nl",
    formality: &[
        ("t_class", &["jij", "jouw", "jou", "jullie", "je"]),
        ("v_class", &["u", "men", "uw"]),
    ],
    pronouns: None,
    verbform: &["Past"],
};

pub(crate) const PORTUGUESE: LanguageTable = LanguageTable {
    code: "pt",
    formality: &[
        ("t_class", &["tu", "tua", "teu", "teus", "tuas", "te"]),
        ("v_class", &["você", "sua", "seu", "seus", "suas", "lhe"]),
    ],
    pronouns: Some(&[
        ("this", &["este", "esta", "esse", "essa"]),
        ("that", &["este", "esta", "esse", "essa"]),
        ("these", &["estes", "estas", "esses", "essas"]),
        ("those", &["estes", "estas", "esses", "essas"]),
        ("it", &["ele", "ela", "o", "a"]),
        ("they", &["eles", "elas"]),
        ("them", &["eles", "elas", "os", "as"]),
    ]),
    verbform: &["Pqp"],
};

pub(crate) const ROMANIAN: LanguageTable = LanguageTable {
    code: "ro",
    formality: &[
        (
            "t_class",
            &["tu", "el", "ea", "voi", "ei", "ele", "tău", "ta", "tale", "tine"],
        ),
        (
            "v_class",
            &[
                "dumneavoastră",
                "dumneata",
                "mata",
                "matale",
                "dânsul",
                "dânsa",
                "dumnealui",
                "dumneaei",
                "dumnealor",
            ],
        ),
    ],
    pronouns: Some(&[
        ("it", &["el", "ea"]),
        ("they", &["ei", "ele"]),
        ("them", &["ei", "ele"]),
    ]),
    verbform: &["Past", "Imp", "Fut"],
};

pub(crate) const RUSSIAN: LanguageTable = LanguageTable {
    code: "ru",
    formality: &[
        (
            "t_class",
            &["ты", "тебя", "тебе", "тобой", "твой", "твоя", "твои"],
        ),
        ("v_class", &["вы", "вас", "вам", "вами", "ваш", "ваши"]),
    ],
    pronouns: None,
    verbform: &["Past"],
};

pub(crate) const TURKISH: LanguageTable = LanguageTable {
    code: "tr",
    formality: &[("t_class", &["sen", "senin"]), ("v_class", &["siz", "sizin"])],
    pronouns: None,
    verbform: &["Pqp"],
};

pub(crate) const CHINESE: LanguageTable = LanguageTable {
    code: "zh",
    formality: &[("t_class", &["你"]), ("v_class", &["您"])],
    pronouns: None,
    verbform: &[],
};

pub(crate) const TAIWANESE: LanguageTable = LanguageTable {
    code: "zh_tw",
    formality: NONE,
    pronouns: None,
    verbform: &[],
};

/// Every built-in table, sorted by code.
pub(crate) const ALL: &[&LanguageTable] = &[
    &ARABIC,
    &GERMAN,
    &ENGLISH,
    &SPANISH,
    &FRENCH,
    &HEBREW,
    &ITALIAN,
    &JAPANESE,
    &KOREAN,
    &DUTCH,
    &PORTUGUESE,
    &ROMANIAN,
    &RUSSIAN,
    &TURKISH,
    &CHINESE,
    &TAIWANESE,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_unique_and_sorted() {
        let codes: Vec<&str> = ALL.iter().map(|t| t.code).collect();
        let mut sorted = codes.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(codes, sorted);
        assert_eq!(codes.len(), 16);
    }

    #[test]
    fn no_word_is_in_two_formality_classes() {
        for table in ALL {
            let mut seen = std::collections::HashSet::new();
            for (_, words) in table.formality {
                for word in *words {
                    assert!(seen.insert(*word), "{} lists {:?} twice", table.code, word);
                }
            }
        }
    }

    #[test]
    fn french_profile_contents() {
        let profile = FRENCH.to_profile();
        assert_eq!(profile.code(), "fr");
        assert_eq!(profile.formality_class("vous"), Some("v_class"));
        assert_eq!(profile.formality_class("toi"), Some("t_class"));
        assert!(profile.is_ambiguous_pronoun("it", "elle"));
        assert!(!profile.is_ambiguous_pronoun("it", "ça"));
        assert!(profile.ambiguous_verbform().contains("Imp"));
    }

    #[test]
    fn languages_without_pronoun_table() {
        assert!(RUSSIAN.to_profile().ambiguous_pronouns().is_none());
        assert!(ENGLISH.to_profile().formality_classes().is_empty());
    }
}
