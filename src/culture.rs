//! 로케일(Culture) 모듈
//!
//! 입력 해석에 쓰이는 소수점/자릿수 구분자와 날짜 순서를 정의합니다.
//! 출력은 항상 로케일과 무관한 형식(invariant)으로 만들어집니다.

use crate::error::{ConvertError, Result};

/// 날짜 구성 요소 순서
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    /// 일-월-년 (15.01.2023)
    Dmy,
    /// 월-일-년 (01/15/2023)
    Mdy,
    /// 년-월-일 (2023-01-15)
    Ymd,
}

/// 입력 해석 규칙 묶음
///
/// 각 변환 작업은 자신의 `Culture` 값을 명시적으로 넘겨받으므로
/// 스레드 간에 공유되는 전역 로케일 상태가 없습니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Culture {
    /// 정규화된 로케일 이름 (invariant는 빈 문자열)
    pub name: &'static str,
    /// 소수점 구분자
    pub decimal_separator: char,
    /// 허용되는 자릿수 구분자
    pub group_separators: &'static [char],
    /// 날짜 구성 요소 순서
    pub date_order: DateOrder,
    /// 기본 날짜 구분자
    pub date_separator: char,
    /// 오전/오후 표기 (소문자)
    pub am_pm: (&'static str, &'static str),
    /// 영어가 아닌 월 이름 (소문자, 월 번호). 영어 이름은 chrono가 직접 해석
    pub month_names: &'static [(&'static str, u32)],
    /// 월 이름 등이 들어간 날짜 형식 (chrono `strftime` 문법)
    pub date_formats: &'static [&'static str],
}

const SPACE_GROUPS: &[char] = &['\u{a0}', '\u{202f}', ' '];

const EN_US_FORMATS: &[&str] = &[
    "%b %d, %Y",
    "%b %d %Y",
    "%d %b %Y",
    "%A, %b %d, %Y",
    "%b %d, %Y %H:%M:%S",
    "%b %d, %Y %H:%M",
    "%b %d, %Y %I:%M:%S %p",
    "%b %d, %Y %I:%M %p",
    "%A, %b %d, %Y %I:%M:%S %p",
    "%d %b %Y %H:%M:%S",
    "%d %b %Y %H:%M",
];

const EN_GB_FORMATS: &[&str] = &[
    "%d %b %Y",
    "%A, %d %b %Y",
    "%d %b %Y %H:%M:%S",
    "%d %b %Y %H:%M",
    "%b %d, %Y",
];

const RU_FORMATS: &[&str] = &[
    "%d %b %Y",
    "%d %b %Y г.",
    "%d %b %Y %H:%M:%S",
    "%d %b %Y %H:%M",
    "%d %b %Y г. %H:%M:%S",
];

const DE_FORMATS: &[&str] = &[
    "%d. %b %Y",
    "%d %b %Y",
    "%d. %b %Y %H:%M:%S",
    "%d. %b %Y %H:%M",
];

const FR_FORMATS: &[&str] = &["%d %b %Y", "%d %b %Y %H:%M:%S", "%d %b %Y %H:%M"];

const KO_FORMATS: &[&str] = &[
    "%Y년 %m월 %d일",
    "%Y년 %m월 %d일 %H:%M:%S",
    "%Y. %m. %d.",
    "%Y. %m. %d. %H:%M:%S",
];

const JA_FORMATS: &[&str] = &["%Y年%m月%d日", "%Y年%m月%d日 %H:%M:%S"];

const RU_MONTHS: &[(&str, u32)] = &[
    ("январь", 1), ("января", 1), ("янв", 1),
    ("февраль", 2), ("февраля", 2), ("фев", 2),
    ("март", 3), ("марта", 3), ("мар", 3),
    ("апрель", 4), ("апреля", 4), ("апр", 4),
    ("май", 5), ("мая", 5),
    ("июнь", 6), ("июня", 6), ("июн", 6),
    ("июль", 7), ("июля", 7), ("июл", 7),
    ("август", 8), ("августа", 8), ("авг", 8),
    ("сентябрь", 9), ("сентября", 9), ("сен", 9), ("сент", 9),
    ("октябрь", 10), ("октября", 10), ("окт", 10),
    ("ноябрь", 11), ("ноября", 11), ("ноя", 11),
    ("декабрь", 12), ("декабря", 12), ("дек", 12),
];

const DE_MONTHS: &[(&str, u32)] = &[
    ("januar", 1), ("jan", 1),
    ("februar", 2), ("feb", 2),
    ("märz", 3), ("mär", 3), ("mrz", 3),
    ("april", 4), ("apr", 4),
    ("mai", 5),
    ("juni", 6), ("jun", 6),
    ("juli", 7), ("jul", 7),
    ("august", 8), ("aug", 8),
    ("september", 9), ("sep", 9), ("sept", 9),
    ("oktober", 10), ("okt", 10),
    ("november", 11), ("nov", 11),
    ("dezember", 12), ("dez", 12),
];

const FR_MONTHS: &[(&str, u32)] = &[
    ("janvier", 1), ("janv", 1),
    ("février", 2), ("févr", 2),
    ("mars", 3),
    ("avril", 4), ("avr", 4),
    ("mai", 5),
    ("juin", 6),
    ("juillet", 7), ("juil", 7),
    ("août", 8),
    ("septembre", 9), ("sept", 9),
    ("octobre", 10), ("oct", 10),
    ("novembre", 11), ("nov", 11),
    ("décembre", 12), ("déc", 12),
];

static CULTURES: &[Culture] = &[
    Culture {
        name: "",
        decimal_separator: '.',
        group_separators: &[','],
        date_order: DateOrder::Mdy,
        date_separator: '/',
        am_pm: ("am", "pm"),
        month_names: &[],
        date_formats: EN_US_FORMATS,
    },
    Culture {
        name: "en-US",
        decimal_separator: '.',
        group_separators: &[','],
        date_order: DateOrder::Mdy,
        date_separator: '/',
        am_pm: ("am", "pm"),
        month_names: &[],
        date_formats: EN_US_FORMATS,
    },
    Culture {
        name: "en-GB",
        decimal_separator: '.',
        group_separators: &[','],
        date_order: DateOrder::Dmy,
        date_separator: '/',
        am_pm: ("am", "pm"),
        month_names: &[],
        date_formats: EN_GB_FORMATS,
    },
    Culture {
        name: "ru-RU",
        decimal_separator: ',',
        group_separators: SPACE_GROUPS,
        date_order: DateOrder::Dmy,
        date_separator: '.',
        am_pm: ("am", "pm"),
        month_names: RU_MONTHS,
        date_formats: RU_FORMATS,
    },
    Culture {
        name: "de-DE",
        decimal_separator: ',',
        group_separators: &['.'],
        date_order: DateOrder::Dmy,
        date_separator: '.',
        am_pm: ("am", "pm"),
        month_names: DE_MONTHS,
        date_formats: DE_FORMATS,
    },
    Culture {
        name: "fr-FR",
        decimal_separator: ',',
        group_separators: SPACE_GROUPS,
        date_order: DateOrder::Dmy,
        date_separator: '/',
        am_pm: ("am", "pm"),
        month_names: FR_MONTHS,
        date_formats: FR_FORMATS,
    },
    Culture {
        name: "ko-KR",
        decimal_separator: '.',
        group_separators: &[','],
        date_order: DateOrder::Ymd,
        date_separator: '-',
        am_pm: ("오전", "오후"),
        month_names: &[],
        date_formats: KO_FORMATS,
    },
    Culture {
        name: "ja-JP",
        decimal_separator: '.',
        group_separators: &[','],
        date_order: DateOrder::Ymd,
        date_separator: '/',
        am_pm: ("午前", "午後"),
        month_names: &[],
        date_formats: JA_FORMATS,
    },
];

const ENGLISH_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

impl Culture {
    /// 로케일과 무관한 기본 규칙
    pub fn invariant() -> &'static Culture {
        &CULTURES[0]
    }

    /// 이름으로 로케일 찾기
    ///
    /// 대소문자와 `_`/`-` 차이는 무시하며, 언어 코드만 준 경우(`ru`)
    /// 해당 언어의 첫 로케일을 사용합니다.
    ///
    /// # Examples
    /// ```
    /// use textconv::culture::Culture;
    ///
    /// let ru = Culture::from_name("ru-RU").unwrap();
    /// assert_eq!(ru.decimal_separator, ',');
    /// assert!(Culture::from_name("xx-YY").is_err());
    /// ```
    pub fn from_name(name: &str) -> Result<&'static Culture> {
        let wanted = name.trim().replace('_', "-");
        if wanted.is_empty() || wanted.eq_ignore_ascii_case("invariant") {
            return Ok(Culture::invariant());
        }

        if let Some(culture) = CULTURES
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(&wanted))
        {
            return Ok(culture);
        }

        if !wanted.contains('-') {
            let prefix = format!("{}-", wanted.to_ascii_lowercase());
            if let Some(culture) = CULTURES
                .iter()
                .find(|c| c.name.to_ascii_lowercase().starts_with(&prefix))
            {
                return Ok(culture);
            }
        }

        Err(ConvertError::UnknownCulture {
            name: name.to_string(),
        })
    }

    /// 표시용 이름 (invariant는 "invariant")
    pub fn display_name(&self) -> &'static str {
        if self.name.is_empty() {
            "invariant"
        } else {
            self.name
        }
    }

    /// 월 이름으로 월 번호 찾기 (소문자로 비교)
    pub fn month_number(&self, word: &str) -> Option<u32> {
        let lower = word.to_lowercase();
        self.month_names
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, month)| *month)
    }

    /// 로케일 월 이름을 chrono가 읽을 수 있는 영어 약어로 바꿈
    ///
    /// 단어는 공백 하나로 다시 이어 붙이고, 약어 뒤의 `.`은 떼어냅니다.
    ///
    /// # Examples
    /// ```
    /// use textconv::culture::Culture;
    ///
    /// let ru = Culture::from_name("ru-RU").unwrap();
    /// assert_eq!(ru.normalize_month_names("15 января 2023"), "15 Jan 2023");
    /// ```
    pub fn normalize_month_names(&self, s: &str) -> String {
        if self.month_names.is_empty() {
            return s.to_string();
        }

        s.split_whitespace()
            .map(|word| {
                let key = word.trim_end_matches(&['.', ','][..]);
                match self.month_number(key) {
                    Some(month) => {
                        let comma = if word[key.len()..].contains(',') { "," } else { "" };
                        format!("{}{}", ENGLISH_MONTHS[month as usize - 1], comma)
                    }
                    None => word.to_string(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// 자릿수 구분자인지 확인
    pub fn is_group_separator(&self, c: char) -> bool {
        self.group_separators.contains(&c)
    }
}
