//! 줄 변환 모듈
//!
//! 한 줄의 텍스트에 세 가지 감지기를 고정된 순서로 적용합니다.
//!
//! 1. 날짜/시간 → `MM/dd/yyyy HH:mm:ss`
//! 2. 실수 → 로케일 무관 최단 표기
//! 3. 문자 인덱스 지시 (`"<인덱스> <텍스트>"`) → 해당 위치의 문자 하나
//!
//! 어떤 감지기도 에러를 내지 않으며, 실패는 다음 감지기로 넘어갑니다.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::culture::{Culture, DateOrder};

/// 로케일 무관 날짜/시간 출력 형식
pub const INVARIANT_DATE_TIME_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

/// 줄 변환 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversion {
    /// 감지기 중 하나가 성공한 경우의 변환 값
    Matched(String),
    /// 어떤 감지기도 일치하지 않음
    NoMatch,
}

impl Conversion {
    /// 일치 여부
    pub fn is_match(&self) -> bool {
        matches!(self, Conversion::Matched(_))
    }

    /// 출력에 쓸 값 (일치하지 않으면 빈 문자열)
    pub fn into_value(self) -> String {
        match self {
            Conversion::Matched(value) => value,
            Conversion::NoMatch => String::new(),
        }
    }
}

/// 한 줄 변환
///
/// # Arguments
/// * `line` - 변환할 줄 (이미 trim된 상태)
/// * `culture` - 입력 해석에 사용할 로케일
///
/// # Examples
/// ```
/// use textconv::culture::Culture;
/// use textconv::detect::{convert_line, Conversion};
///
/// let en = Culture::from_name("en-US").unwrap();
/// assert_eq!(convert_line("3.14", en), Conversion::Matched("3.14".to_string()));
/// assert_eq!(convert_line("2 hello", en), Conversion::Matched("l".to_string()));
/// assert_eq!(convert_line("hello", en), Conversion::NoMatch);
/// ```
pub fn convert_line(line: &str, culture: &Culture) -> Conversion {
    if let Some(date_time) = parse_date_time(line, culture) {
        return Conversion::Matched(date_time.format(INVARIANT_DATE_TIME_FORMAT).to_string());
    }
    if let Some(number) = parse_number(line, culture) {
        return Conversion::Matched(format_number(number));
    }
    if let Some(c) = char_at_instruction(line) {
        return Conversion::Matched(c.to_string());
    }
    Conversion::NoMatch
}

/// 날짜(와 선택적 시간) 파싱
///
/// 다음 순서로 시도합니다.
///
/// 1. 시간대가 붙은 RFC 3339 / RFC 2822 (UTC로 변환)
/// 2. 숫자로만 된 날짜 (`15.01.2023`, `1/15/23 3:04 PM`, `2023-01-15T10:30`)
/// 3. 로케일의 날짜 형식 목록 (월 이름 등)
///
/// 날짜 없이 시간만 있는 입력은 받지 않습니다.
pub fn parse_date_time(s: &str, culture: &Culture) -> Option<NaiveDateTime> {
    let s = s.trim();
    parse_zoned(s)
        .or_else(|| parse_numeric_date_time(s, culture))
        .or_else(|| parse_with_formats(s, culture))
}

fn parse_zoned(s: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(s)
        .or_else(|_| DateTime::parse_from_rfc2822(s))
        .ok()
        .map(|dt| dt.naive_utc())
}

fn parse_numeric_date_time(s: &str, culture: &Culture) -> Option<NaiveDateTime> {
    let split = s
        .char_indices()
        .find(|(_, c)| c.is_whitespace() || *c == 'T');

    let (date_str, time_str) = match split {
        Some((i, c)) => (&s[..i], Some(s[i + c.len_utf8()..].trim())),
        None => (s, None),
    };

    let date = parse_date(date_str, culture)?;
    let time = match time_str {
        Some(t) => parse_time(t, culture)?,
        None => NaiveTime::from_hms_opt(0, 0, 0)?,
    };

    Some(date.and_time(time))
}

fn parse_with_formats(s: &str, culture: &Culture) -> Option<NaiveDateTime> {
    let normalized = culture.normalize_month_names(s);

    culture.date_formats.iter().find_map(|format| {
        NaiveDateTime::parse_from_str(&normalized, format)
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(&normalized, format)
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
    })
}

fn parse_date(s: &str, culture: &Culture) -> Option<NaiveDate> {
    let sep = s.chars().find(|c| !c.is_ascii_digit())?;
    if !matches!(sep, '/' | '.' | '-') && sep != culture.date_separator {
        return None;
    }

    let parts: Vec<&str> = s.split(sep).collect();
    if parts.len() != 3
        || parts
            .iter()
            .any(|p| p.is_empty() || p.len() > 4 || !p.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }

    // 네 자리로 시작하면 로케일과 관계없이 년-월-일
    let order = if parts[0].len() == 4 {
        DateOrder::Ymd
    } else {
        culture.date_order
    };

    let (y, m, d) = match order {
        DateOrder::Ymd => (parts[0], parts[1], parts[2]),
        DateOrder::Dmy => (parts[2], parts[1], parts[0]),
        DateOrder::Mdy => (parts[2], parts[0], parts[1]),
    };

    if m.len() > 2 || d.len() > 2 {
        return None;
    }

    NaiveDate::from_ymd_opt(parse_year(y)?, m.parse().ok()?, d.parse().ok()?)
}

/// 두 자리 연도는 00-49 → 2000년대, 50-99 → 1900년대
fn parse_year(s: &str) -> Option<i32> {
    let value: i32 = s.parse().ok()?;
    match s.len() {
        1 | 2 if value <= 49 => Some(2000 + value),
        1 | 2 => Some(1900 + value),
        4 if value >= 1 => Some(value),
        _ => None,
    }
}

fn parse_time(s: &str, culture: &Culture) -> Option<NaiveTime> {
    let lower = s.to_lowercase();
    let (clock, pm) = strip_meridiem(&lower, culture);

    let parts: Vec<&str> = clock.split(':').collect();
    if !(2..=3).contains(&parts.len()) {
        return None;
    }

    let hour = parse_digits(parts[0], 1, 2)?;
    let minute = parse_digits(parts[1], 2, 2)?;
    let (second, nano) = match parts.get(2) {
        Some(sec) => parse_seconds(sec)?,
        None => (0, 0),
    };

    let hour = match pm {
        None => hour,
        Some(_) if hour == 0 || hour > 12 => return None,
        Some(false) => hour % 12,
        Some(true) => hour % 12 + 12,
    };

    NaiveTime::from_hms_nano_opt(hour, minute, second, nano)
}

/// 오전/오후 표기를 떼어냄. 반환값의 두 번째 요소는 표기가 있을 때 오후 여부
fn strip_meridiem<'a>(s: &'a str, culture: &Culture) -> (&'a str, Option<bool>) {
    let designators = [
        (culture.am_pm.0, false),
        (culture.am_pm.1, true),
        ("am", false),
        ("pm", true),
    ];

    for (designator, pm) in designators {
        if let Some(rest) = s.strip_suffix(designator) {
            return (rest.trim(), Some(pm));
        }
        if let Some(rest) = s.strip_prefix(designator) {
            return (rest.trim(), Some(pm));
        }
    }

    (s, None)
}

fn parse_seconds(s: &str) -> Option<(u32, u32)> {
    let (whole, fraction) = match s.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (s, None),
    };

    let second = parse_digits(whole, 2, 2)?;
    let nano = match fraction {
        Some(f) if !f.is_empty() && f.len() <= 9 && f.bytes().all(|b| b.is_ascii_digit()) => {
            format!("{:0<9}", f).parse().ok()?
        }
        Some(_) => return None,
        None => 0,
    };

    Some((second, nano))
}

fn parse_digits(s: &str, min_len: usize, max_len: usize) -> Option<u32> {
    if s.len() < min_len || s.len() > max_len || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// 로케일 규칙에 따른 실수 파싱
///
/// 부호, 자릿수 구분자, 소수점, 지수를 허용하며 `NaN`/`Infinity` 기호도 받습니다.
pub fn parse_number(s: &str, culture: &Culture) -> Option<f64> {
    let s = s.trim();
    match s {
        "NaN" => return Some(f64::NAN),
        "Infinity" | "+Infinity" | "∞" => return Some(f64::INFINITY),
        "-Infinity" | "-∞" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    let mut chars = s.chars().peekable();
    let mut normalized = String::with_capacity(s.len());

    if let Some(&sign) = chars.peek() {
        if sign == '+' || sign == '-' {
            if sign == '-' {
                normalized.push('-');
            }
            chars.next();
        }
    }

    let mut digits = 0;
    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() {
            normalized.push(c);
            digits += 1;
        } else if digits == 0 || !culture.is_group_separator(c) {
            break;
        }
        chars.next();
    }

    if chars.peek() == Some(&culture.decimal_separator) {
        chars.next();
        normalized.push('.');
        while let Some(&c) = chars.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            normalized.push(c);
            digits += 1;
            chars.next();
        }
    }

    if digits == 0 {
        return None;
    }

    if matches!(chars.peek(), Some('e') | Some('E')) {
        chars.next();
        normalized.push('e');
        if let Some(&sign) = chars.peek() {
            if sign == '+' || sign == '-' {
                normalized.push(sign);
                chars.next();
            }
        }
        let mut exponent_digits = 0;
        while let Some(&c) = chars.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            normalized.push(c);
            exponent_digits += 1;
            chars.next();
        }
        if exponent_digits == 0 {
            return None;
        }
    }

    if chars.next().is_some() {
        return None;
    }

    normalized.parse().ok()
}

/// 로케일 무관 최단 왕복 표기
///
/// 10진 지수가 15 이상이거나 -5 이하이면 지수 표기(`1E+15`, `1E-05`)를 씁니다.
///
/// # Examples
/// ```
/// use textconv::detect::format_number;
///
/// assert_eq!(format_number(3.14), "3.14");
/// assert_eq!(format_number(3.0), "3");
/// assert_eq!(format_number(1e15), "1E+15");
/// assert_eq!(format_number(0.00001), "1E-05");
/// ```
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let symbol = if value > 0.0 { "Infinity" } else { "-Infinity" };
        return symbol.to_string();
    }
    if value == 0.0 {
        let zero = if value.is_sign_negative() { "-0" } else { "0" };
        return zero.to_string();
    }

    let scientific = format!("{:e}", value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value.to_string();
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if (-4..15).contains(&exponent) {
        value.to_string()
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}E{}{:02}", mantissa, sign, exponent.abs())
    }
}

/// `"<인덱스> <텍스트>"` 형식의 문자 인덱스 지시 처리
///
/// 공백 문자 하나하나를 구분자로 보므로 연속 공백은 빈 토큰을 만듭니다.
/// 토큰이 부족하거나, 인덱스가 정수가 아니거나, 범위를 벗어나면 `None`.
pub fn char_at_instruction(s: &str) -> Option<char> {
    let mut tokens = s.split(char::is_whitespace);
    let index_token = tokens.next()?;
    let text = tokens.next()?;

    let index: i32 = index_token.parse().ok()?;
    let index = usize::try_from(index).ok()?;

    text.chars().nth(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn en() -> &'static Culture {
        Culture::from_name("en-US").unwrap()
    }

    fn ru() -> &'static Culture {
        Culture::from_name("ru-RU").unwrap()
    }

    fn matched(s: &str) -> Conversion {
        Conversion::Matched(s.to_string())
    }

    #[test]
    fn test_iso_date() {
        assert_eq!(convert_line("2023-01-15", en()), matched("01/15/2023 00:00:00"));
        assert_eq!(convert_line("2023-01-15", ru()), matched("01/15/2023 00:00:00"));
    }

    #[test]
    fn test_culture_date_order() {
        assert_eq!(convert_line("01/15/2023", en()), matched("01/15/2023 00:00:00"));
        assert_eq!(convert_line("15.01.2023", ru()), matched("01/15/2023 00:00:00"));
        // en-US에서는 15월이 없음 → 숫자도 아님 → 일치 없음
        assert_eq!(convert_line("15/01/2023", en()), Conversion::NoMatch);
    }

    #[test]
    fn test_two_digit_year() {
        assert_eq!(convert_line("1/2/23", en()), matched("01/02/2023 00:00:00"));
        assert_eq!(convert_line("1/2/87", en()), matched("01/02/1987 00:00:00"));
    }

    #[test]
    fn test_date_with_time() {
        assert_eq!(
            convert_line("2023-01-15T10:30:05", en()),
            matched("01/15/2023 10:30:05")
        );
        assert_eq!(
            convert_line("15.01.2023 7:05", ru()),
            matched("01/15/2023 07:05:00")
        );
        assert_eq!(
            convert_line("1/15/2023 3:04:05 PM", en()),
            matched("01/15/2023 15:04:05")
        );
        assert_eq!(
            convert_line("1/15/2023 12:00 am", en()),
            matched("01/15/2023 00:00:00")
        );
        assert_eq!(
            convert_line("2023-01-15 10:30:05.250", en()),
            matched("01/15/2023 10:30:05")
        );
    }

    #[test]
    fn test_english_month_names() {
        assert_eq!(convert_line("January 15, 2023", en()), matched("01/15/2023 00:00:00"));
        assert_eq!(convert_line("15 Jan 2023", en()), matched("01/15/2023 00:00:00"));
        assert_eq!(
            convert_line("Sunday, January 15, 2023", en()),
            matched("01/15/2023 00:00:00")
        );
        assert_eq!(
            convert_line("Jan 15, 2023 3:04:05 PM", en()),
            matched("01/15/2023 15:04:05")
        );
    }

    #[test]
    fn test_localized_month_names() {
        assert_eq!(convert_line("15 января 2023", ru()), matched("01/15/2023 00:00:00"));
        assert_eq!(
            convert_line("15 января 2023 г.", ru()),
            matched("01/15/2023 00:00:00")
        );

        let de = Culture::from_name("de-DE").unwrap();
        assert_eq!(convert_line("1. März 2023", de), matched("03/01/2023 00:00:00"));

        let fr = Culture::from_name("fr-FR").unwrap();
        assert_eq!(
            convert_line("15 févr. 2023 10:30", fr),
            matched("02/15/2023 10:30:00")
        );
    }

    #[test]
    fn test_cjk_formats() {
        let ko = Culture::from_name("ko-KR").unwrap();
        assert_eq!(convert_line("2023년 1월 15일", ko), matched("01/15/2023 00:00:00"));

        let ja = Culture::from_name("ja-JP").unwrap();
        assert_eq!(convert_line("2023年1月15日", ja), matched("01/15/2023 00:00:00"));
    }

    #[test]
    fn test_zoned_forms_convert_to_utc() {
        assert_eq!(
            convert_line("2023-01-15T10:30:05Z", en()),
            matched("01/15/2023 10:30:05")
        );
        assert_eq!(
            convert_line("2023-01-15T10:30:05+03:00", ru()),
            matched("01/15/2023 07:30:05")
        );
        assert_eq!(
            convert_line("Sun, 15 Jan 2023 10:30:05 GMT", en()),
            matched("01/15/2023 10:30:05")
        );
    }

    #[test]
    fn test_month_name_of_other_culture_is_not_a_date() {
        assert!(parse_date_time("15 января 2023", en()).is_none());
        assert!(parse_date_time("Janvember 15, 2023", en()).is_none());
    }

    #[test]
    fn test_invalid_dates() {
        assert!(parse_date_time("2023-02-30", en()).is_none());
        assert!(parse_date_time("2023-01-15 25:00", en()).is_none());
        assert!(parse_date_time("2023-01", en()).is_none());
        assert!(parse_date_time("2023/01-15", en()).is_none());
        assert!(parse_date_time("10:30", en()).is_none());
        assert!(parse_date_time("1/15/2023 13:00 pm", en()).is_none());
    }

    #[test]
    fn test_numbers_en() {
        assert_eq!(convert_line("3.14", en()), matched("3.14"));
        assert_eq!(convert_line("-42", en()), matched("-42"));
        assert_eq!(convert_line("1,234.5", en()), matched("1234.5"));
        assert_eq!(convert_line(".5", en()), matched("0.5"));
        assert_eq!(convert_line("2.5e3", en()), matched("2500"));
        assert_eq!(convert_line("NaN", en()), matched("NaN"));
        assert_eq!(convert_line("-Infinity", en()), matched("-Infinity"));
    }

    #[test]
    fn test_numbers_ru() {
        assert_eq!(convert_line("3,14", ru()), matched("3.14"));
        assert_eq!(convert_line("1\u{a0}234,5", ru()), matched("1234.5"));
        assert_eq!(parse_number("3.14", ru()), None);
    }

    #[test]
    fn test_number_rejects_garbage() {
        assert_eq!(parse_number("", en()), None);
        assert_eq!(parse_number("-", en()), None);
        assert_eq!(parse_number(",5", en()), None);
        assert_eq!(parse_number("1e", en()), None);
        assert_eq!(parse_number("12abc", en()), None);
        assert_eq!(parse_number("inf", en()), None);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(0.1), "0.1");
        assert_eq!(format_number(0.0001), "0.0001");
        assert_eq!(format_number(1e-5), "1E-05");
        assert_eq!(format_number(1.5e-7), "1.5E-07");
        assert_eq!(format_number(1e14), "100000000000000");
        assert_eq!(format_number(1.25e15), "1.25E+15");
        assert_eq!(format_number(1e300), "1E+300");
        assert_eq!(format_number(-0.0), "-0");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
    }

    #[test]
    fn test_char_index() {
        assert_eq!(convert_line("2 hello", en()), matched("l"));
        assert_eq!(convert_line("0 x", en()), matched("x"));
        assert_eq!(convert_line("1 héllo", en()), matched("é"));
        assert_eq!(convert_line("4 hello extra", en()), matched("o"));
    }

    #[test]
    fn test_char_index_no_match() {
        assert_eq!(char_at_instruction("5 hello"), None);
        assert_eq!(char_at_instruction("-1 hello"), None);
        assert_eq!(char_at_instruction("x hello"), None);
        assert_eq!(char_at_instruction("hello"), None);
        assert_eq!(char_at_instruction(""), None);
        // 연속 공백 → 두 번째 토큰이 빈 문자열
        assert_eq!(char_at_instruction("0  hello"), None);
        assert_eq!(char_at_instruction("99999999999 hello"), None);
    }

    #[test]
    fn test_no_match_value_is_empty() {
        let result = convert_line("hello world", en());
        assert!(!result.is_match());
        assert_eq!(result.into_value(), "");
    }
}
