use derive_more::{Deref, Display, From};
use num_format::{Locale, ToFormattedString};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// サービスID
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Deref,
)]
pub struct ServiceId(u64);

/// 料金（トルコリラ、整数）
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, From, Deref)]
pub struct Price(u64);

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "₺{}", self.0.to_formatted_string(&Locale::tr))
    }
}

/// サービスエンティティ
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    id: ServiceId,
    name: String,
    category: String,
    price: Price,
}

impl Service {
    fn new(id: u64, name: &str, category: &str, price: u64) -> Self {
        Self {
            id: ServiceId(id),
            name: name.to_owned(),
            category: category.to_owned(),
            price: Price(price),
        }
    }

    pub fn id(&self) -> ServiceId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn price(&self) -> Price {
        self.price
    }
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {} ({})", self.id, self.name, self.price)
    }
}

static CATALOG: Lazy<Vec<Service>> = Lazy::new(|| {
    vec![
        Service::new(1, "DJ Hizmeti (2 Saat)", "Müzik & Sanatçı", 5000),
        Service::new(2, "Masa Süsleme (Romantik)", "Dekorasyon & Süsleme", 1500),
        Service::new(3, "Catering (Kişi Başı)", "Yemek & İkram", 800),
        Service::new(4, "Profesyonel Fotoğrafçılık (4 Saat)", "Fotoğraf & Video", 3500),
        Service::new(5, "LED Aydınlatma Sistemi", "Teknik Ekipman", 2000),
    ]
});

/// 全サービスをカタログ順に返す
pub fn list_services() -> &'static [Service] {
    &CATALOG
}

/// カタログに存在するサービスIDをカタログ順に返す
pub fn valid_ids() -> impl Iterator<Item = ServiceId> {
    CATALOG.iter().map(Service::id)
}

pub fn find(id: ServiceId) -> Option<&'static Service> {
    CATALOG.iter().find(|s| s.id == id)
}
