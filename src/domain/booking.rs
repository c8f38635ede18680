use std::collections::BTreeMap;
use std::fmt::Display;

use chrono::NaiveDate;
use derive_more::Error;
use serde::Serialize;
use serde_json::{Map, Value};

use super::catalog::{self, Service, ServiceId};

/// `event_date` の書式
const DATE_FORMAT: &str = "%Y-%m-%d";

/// 検証済みの予約リクエスト
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedBooking {
    service_ids: Vec<ServiceId>,
    event_date: NaiveDate,
    notes: Option<Value>,
}

impl ValidatedBooking {
    pub fn service_ids(&self) -> &[ServiceId] {
        &self.service_ids
    }

    /// 予約されたサービスをカタログから引く
    pub fn services(&self) -> impl Iterator<Item = &'static Service> + '_ {
        self.service_ids.iter().filter_map(|id| catalog::find(*id))
    }

    pub fn event_date(&self) -> NaiveDate {
        self.event_date
    }

    /// 送られてきたままの備考。検証はしない
    pub fn notes(&self) -> Option<&Value> {
        self.notes.as_ref()
    }
}

/// エラーを報告するフィールド
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingField {
    RequestBody,
    ServiceIds,
    EventDate,
}

impl Display for BookingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingField::RequestBody => write!(f, "request_body"),
            BookingField::ServiceIds => write!(f, "service_ids"),
            BookingField::EventDate => write!(f, "event_date"),
        }
    }
}

/// 予約リクエストの検証エラー
///
/// 最初に失敗したフィールドだけを報告する
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BookingError {
    /// JSONオブジェクトではない、または空
    MissingBody,
    /// service_idsがない
    ServiceIdsRequired,
    /// service_idsが配列ではない
    ServiceIdsNotArray,
    /// カタログにないサービスIDが含まれる
    UnknownServiceIds { invalid: Vec<Value> },
    /// event_dateがない
    EventDateRequired,
    /// event_dateが文字列ではない
    EventDateNotString,
    /// YYYY-MM-DDとして読めない
    EventDateMalformed,
    /// 今日以前の日付
    EventDateNotInFuture,
}

impl BookingError {
    pub fn field(&self) -> BookingField {
        match self {
            BookingError::MissingBody => BookingField::RequestBody,
            BookingError::ServiceIdsRequired
            | BookingError::ServiceIdsNotArray
            | BookingError::UnknownServiceIds { .. } => BookingField::ServiceIds,
            BookingError::EventDateRequired
            | BookingError::EventDateNotString
            | BookingError::EventDateMalformed
            | BookingError::EventDateNotInFuture => BookingField::EventDate,
        }
    }

    /// レスポンスの `details` に載せるフィールド別メッセージ
    pub fn details(&self) -> BTreeMap<BookingField, String> {
        BTreeMap::from([(self.field(), self.to_string())])
    }
}

impl Display for BookingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingError::MissingBody => write!(f, "JSON formatında veri gönderilmelidir."),
            BookingError::ServiceIdsRequired | BookingError::EventDateRequired => {
                write!(f, "Bu alan zorunludur.")
            }
            BookingError::ServiceIdsNotArray => write!(f, "Bu alan bir liste (array) olmalıdır."),
            BookingError::UnknownServiceIds { invalid } => {
                let valid = catalog::valid_ids().map(|id| Value::from(*id)).collect::<Vec<_>>();
                write!(
                    f,
                    "Geçersiz hizmet ID'leri: {}. Geçerli ID'ler: {}",
                    JsonList(invalid),
                    JsonList(&valid)
                )
            }
            BookingError::EventDateNotString => {
                write!(f, "Bu alan string (metin) formatında olmalıdır.")
            }
            BookingError::EventDateMalformed => {
                write!(f, "Tarih formatı YYYY-MM-DD olmalıdır (örn: 2025-12-24).")
            }
            BookingError::EventDateNotInFuture => write!(
                f,
                "Tarih formatı YYYY-MM-DD olmalıdır ve gelecek bir tarih olmalıdır."
            ),
        }
    }
}

/// `[1, 2, "a"]` の形で値を並べる
struct JsonList<'a>(&'a [Value]);

impl Display for JsonList<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "]")
    }
}

/// 予約リクエストを検証する
///
/// `service_ids`、`event_date` の順に調べ、最初の違反で止まる。
/// `event_date` は `today` より後でなければならない（今日は不可）。
pub fn validate(payload: Option<&Value>, today: NaiveDate) -> Result<ValidatedBooking, BookingError> {
    let body = payload
        .and_then(Value::as_object)
        .ok_or(BookingError::MissingBody)?;
    let service_ids = validate_service_ids(body)?;
    let event_date = validate_event_date(body, today)?;
    Ok(ValidatedBooking {
        service_ids,
        event_date,
        notes: body.get("notes").cloned(),
    })
}

fn validate_service_ids(body: &Map<String, Value>) -> Result<Vec<ServiceId>, BookingError> {
    let values = body
        .get("service_ids")
        .ok_or(BookingError::ServiceIdsRequired)?
        .as_array()
        .ok_or(BookingError::ServiceIdsNotArray)?;
    let mut ids = Vec::with_capacity(values.len());
    let mut invalid = Vec::new();
    for value in values {
        match known_service_id(value) {
            Some(id) => ids.push(id),
            None => invalid.push(value.clone()),
        }
    }
    if !invalid.is_empty() {
        return Err(BookingError::UnknownServiceIds { invalid });
    }
    Ok(ids)
}

/// カタログのIDと等しい数値だけを受け付ける。`1.0` は `1` と同じ扱い
fn known_service_id(value: &Value) -> Option<ServiceId> {
    let raw = match value.as_u64() {
        Some(n) => n,
        None => value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= 1.0 && *f <= u64::MAX as f64)
            .map(|f| f as u64)?,
    };
    Some(ServiceId::from(raw)).filter(|id| catalog::find(*id).is_some())
}

fn validate_event_date(body: &Map<String, Value>, today: NaiveDate) -> Result<NaiveDate, BookingError> {
    let raw = body
        .get("event_date")
        .ok_or(BookingError::EventDateRequired)?
        .as_str()
        .ok_or(BookingError::EventDateNotString)?;
    let date = parse_event_date(raw).ok_or(BookingError::EventDateMalformed)?;
    if date <= today {
        return Err(BookingError::EventDateNotInFuture);
    }
    Ok(date)
}

/// ゼロ埋めの `YYYY-MM-DD` だけを日付として読む
fn parse_event_date(raw: &str) -> Option<NaiveDate> {
    let shaped = raw.len() == 10
        && raw.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use serde_json::json;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()
    }

    fn date_after(days: i64) -> String {
        (today() + Duration::days(days)).format(DATE_FORMAT).to_string()
    }

    fn check(payload: Value) -> Result<ValidatedBooking, BookingError> {
        validate(Some(&payload), today())
    }

    #[test]
    fn test_valid_booking() {
        let booking = check(json!({
            "service_ids": [1, 3],
            "event_date": date_after(30),
            "notes": "Yılbaşı kutlaması için."
        }))
        .unwrap();
        assert_eq!(booking.service_ids(), &[ServiceId::from(1), ServiceId::from(3)]);
        assert_eq!(booking.event_date(), NaiveDate::from_ymd_opt(2025, 12, 3).unwrap());
        assert_eq!(booking.notes(), Some(&json!("Yılbaşı kutlaması için.")));
    }

    #[test]
    fn test_notes_optional() {
        let booking = check(json!({ "service_ids": [2], "event_date": date_after(10) })).unwrap();
        assert_eq!(booking.notes(), None);
    }

    #[test]
    fn test_empty_service_ids_allowed() {
        let booking = check(json!({ "service_ids": [], "event_date": date_after(5) })).unwrap();
        assert!(booking.service_ids().is_empty());
    }

    #[test]
    fn test_missing_body() {
        assert_eq!(validate(None, today()), Err(BookingError::MissingBody));
        assert_eq!(check(json!([1, 2])), Err(BookingError::MissingBody));
        assert_eq!(check(json!("text")), Err(BookingError::MissingBody));
        assert_eq!(BookingError::MissingBody.field(), BookingField::RequestBody);
    }

    #[test]
    fn test_empty_object_reports_service_ids() {
        assert_eq!(check(json!({})), Err(BookingError::ServiceIdsRequired));
    }

    #[test]
    fn test_service_ids_required() {
        let err = check(json!({ "event_date": date_after(5) })).unwrap_err();
        assert_eq!(err, BookingError::ServiceIdsRequired);
        assert_eq!(err.field(), BookingField::ServiceIds);
        assert_eq!(err.to_string(), "Bu alan zorunludur.");
    }

    #[test]
    fn test_service_ids_not_array() {
        let err = check(json!({ "service_ids": "1,2,3", "event_date": date_after(5) })).unwrap_err();
        assert_eq!(err, BookingError::ServiceIdsNotArray);
    }

    #[test]
    fn test_unknown_service_ids() {
        let err = check(json!({ "service_ids": [1, 999], "event_date": date_after(5) })).unwrap_err();
        assert_eq!(err, BookingError::UnknownServiceIds { invalid: vec![json!(999)] });
        assert_eq!(
            err.to_string(),
            "Geçersiz hizmet ID'leri: [999]. Geçerli ID'ler: [1, 2, 3, 4, 5]"
        );
    }

    #[test]
    fn test_whole_float_service_ids_match_catalog() {
        let booking = check(json!({ "service_ids": [1.0, 4], "event_date": date_after(5) })).unwrap();
        assert_eq!(booking.service_ids(), &[ServiceId::from(1), ServiceId::from(4)]);
        let names = booking.services().map(Service::name).collect::<Vec<_>>();
        assert_eq!(names, vec!["DJ Hizmeti (2 Saat)", "Profesyonel Fotoğrafçılık (4 Saat)"]);
    }

    #[test]
    fn test_non_integer_service_ids_are_invalid() {
        let err = check(json!({
            "service_ids": [0, -1, 2.5, "1", null, true],
            "event_date": date_after(5)
        }))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Geçersiz hizmet ID'leri: [0, -1, 2.5, \"1\", null, true]. Geçerli ID'ler: [1, 2, 3, 4, 5]"
        );
    }

    #[test]
    fn test_service_ids_checked_before_event_date() {
        let err = check(json!({ "service_ids": [42], "event_date": "nope" })).unwrap_err();
        assert_eq!(err.field(), BookingField::ServiceIds);
    }

    #[test]
    fn test_event_date_required() {
        assert_eq!(check(json!({ "service_ids": [1, 2] })), Err(BookingError::EventDateRequired));
    }

    #[test]
    fn test_event_date_not_string() {
        assert_eq!(
            check(json!({ "service_ids": [1], "event_date": 20251224 })),
            Err(BookingError::EventDateNotString)
        );
    }

    #[test]
    fn test_event_date_malformed() {
        for raw in [
            "24-12-2025",
            "2025-13-01",
            "2025-12-32",
            "2025-02-30",
            "2025-1-05",
            "2025/12/24",
            "2025-12-24T10:00",
            " 2025-12-24",
            "",
        ] {
            assert_eq!(
                check(json!({ "service_ids": [1], "event_date": raw })),
                Err(BookingError::EventDateMalformed),
                "{raw}"
            );
        }
        assert_eq!(
            BookingError::EventDateMalformed.to_string(),
            "Tarih formatı YYYY-MM-DD olmalıdır (örn: 2025-12-24)."
        );
    }

    #[test]
    fn test_event_date_past_and_today_rejected() {
        for days in [-10, -1, 0] {
            let err = check(json!({ "service_ids": [1], "event_date": date_after(days) })).unwrap_err();
            assert_eq!(err, BookingError::EventDateNotInFuture);
            assert!(err.to_string().contains("gelecek bir tarih"));
        }
    }

    #[test]
    fn test_event_date_tomorrow_accepted() {
        let booking = check(json!({ "service_ids": [1, 2, 3], "event_date": date_after(1) })).unwrap();
        assert_eq!(booking.event_date(), today().succ_opt().unwrap());
    }

    #[test]
    fn test_leap_day() {
        let leap = NaiveDate::from_ymd_opt(2028, 2, 29).unwrap();
        let booking = check(json!({ "service_ids": [5], "event_date": "2028-02-29" })).unwrap();
        assert_eq!(booking.event_date(), leap);
    }

    #[test]
    fn test_details_json() {
        let details = serde_json::to_value(BookingError::EventDateRequired.details()).unwrap();
        assert_eq!(details, json!({ "event_date": "Bu alan zorunludur." }));
    }
}
