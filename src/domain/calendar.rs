use chrono::{Local, NaiveDate, Utc};
use serde::Deserialize;

/// 「今日」を決める基準タイムゾーン
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceTimezone {
    /// サーバーのローカル時刻
    #[default]
    Local,
    /// 協定世界時
    Utc,
}

impl ReferenceTimezone {
    pub fn today(&self) -> NaiveDate {
        match self {
            ReferenceTimezone::Local => Local::now().date_naive(),
            ReferenceTimezone::Utc => Utc::now().date_naive(),
        }
    }
}
