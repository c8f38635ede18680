use std::ops::RangeInclusive;

use derive_more::{Deref, Display, From};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// 予約確認番号
///
/// 一意性は保証しない。衝突はあり得る
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Display, From, Deref)]
pub struct BookingId(u32);

impl BookingId {
    pub const RANGE: RangeInclusive<u32> = 1000..=9999;
}

/// 予約確認番号の採番
pub trait BookingIdGenerator {
    fn generate(&self) -> BookingId;
}

/// [`BookingId::RANGE`] から一様に採番する
#[derive(Copy, Clone, Debug, Default)]
pub struct RandomBookingIdGenerator;

impl BookingIdGenerator for RandomBookingIdGenerator {
    fn generate(&self) -> BookingId {
        BookingId(rand::thread_rng().gen_range(BookingId::RANGE))
    }
}
