use crate::domain::model::{Coordinate, Venue};
use crate::domain::purpose::Feature;
use crate::utils::error::{MeetError, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// 唯讀的候選場所目錄，啟動時建立一次後以 `Arc` 共享
#[derive(Debug, Clone, PartialEq)]
pub struct VenueCatalog {
    venues: Vec<Venue>,
}

/// CSV 欄位：label,lat,lng,venue_type,features（features 以 `;` 分隔）
#[derive(Debug, Deserialize)]
struct CatalogRow {
    label: String,
    lat: f64,
    lng: f64,
    venue_type: String,
    #[serde(default)]
    features: String,
}

// 首爾主要地鐵站：(label, lat, lng, features)
const SEOUL_STATIONS: &[(&str, f64, f64, &[Feature])] = {
    use Feature::*;
    &[
        ("Gangnam Station", 37.4979, 127.0276, &[Cafe, Restaurant, Shopping]),
        ("Hongik Univ. Station", 37.5571, 126.9244, &[Cafe, Restaurant, Culture]),
        ("Sinchon Station", 37.5551, 126.9368, &[Cafe, Restaurant, Culture]),
        ("Hapjeong Station", 37.5495, 126.9139, &[Cafe, Restaurant, Culture]),
        ("Jamsil Station", 37.5132, 127.1001, &[Shopping, Entertainment, Restaurant]),
        ("Konkuk Univ. Station", 37.5403, 127.0694, &[Cafe, Restaurant, Shopping]),
        ("Wangsimni Station", 37.5615, 127.0378, &[Shopping, Restaurant]),
        ("Seoul Station", 37.5547, 126.9707, &[Restaurant, Shopping]),
        ("City Hall Station", 37.5654, 126.9778, &[Restaurant, Culture]),
        ("Euljiro 1-ga Station", 37.5660, 126.9824, &[Restaurant, Shopping]),
        ("Jonggak Station", 37.5700, 126.9828, &[Cafe, Restaurant, Culture]),
        ("Gwanghwamun Station", 37.5710, 126.9768, &[Culture, Restaurant]),
        ("Myeong-dong Station", 37.5609, 126.9860, &[Shopping, Restaurant, Cafe]),
        ("Dongdaemun Station", 37.5713, 127.0095, &[Shopping, Restaurant]),
        ("Seongsu Station", 37.5446, 127.0557, &[Cafe, Culture]),
        ("Samseong Station", 37.5089, 127.0634, &[Shopping, Restaurant, Business]),
        ("Seolleung Station", 37.5045, 127.0490, &[Cafe, Restaurant, Business]),
        ("Yeoksam Station", 37.5007, 127.0365, &[Cafe, Restaurant, Business]),
        ("Seoul Nat'l Univ. of Education Station", 37.4934, 127.0145, &[Cafe, Restaurant]),
        ("Sadang Station", 37.4766, 126.9816, &[Cafe, Restaurant]),
        ("Itaewon Station", 37.5345, 126.9947, &[Restaurant, Culture, Cafe]),
        ("Apgujeong Station", 37.5273, 127.0283, &[Cafe, Shopping, Restaurant]),
        ("Cheongdam Station", 37.5193, 127.0533, &[Cafe, Shopping, Restaurant]),
        ("Yeouido Station", 37.5216, 126.9244, &[Restaurant, Business]),
        ("Dangsan Station", 37.5347, 126.9027, &[Cafe, Restaurant]),
        ("Yeongdeungpo-gu Office Station", 37.5253, 126.8965, &[Restaurant, Shopping]),
        ("Noryangjin Station", 37.5134, 126.9423, &[Restaurant, Cafe]),
        ("Sillim Station", 37.4842, 126.9296, &[Cafe, Restaurant]),
        ("Daerim Station", 37.4930, 126.8975, &[Restaurant]),
        ("Guro Digital Complex Station", 37.4852, 126.9016, &[Cafe, Restaurant, Business]),
        ("Sindorim Station", 37.5089, 126.8913, &[Shopping, Restaurant]),
        ("Express Bus Terminal Station", 37.5049, 127.0050, &[Shopping, Restaurant]),
        ("Gangbyeon Station", 37.5352, 127.0944, &[Shopping, Entertainment]),
        ("Ttukseom Station", 37.5474, 127.0474, &[Cafe, Culture]),
        ("Gongdeok Station", 37.5441, 126.9516, &[Cafe, Restaurant]),
        ("Mapo Station", 37.5397, 126.9459, &[Restaurant]),
        ("Mangwon Station", 37.5560, 126.9103, &[Cafe, Culture]),
        ("Sangsu Station", 37.5478, 126.9227, &[Cafe, Culture]),
        ("Isu Station", 37.4856, 126.9820, &[Cafe, Restaurant]),
        ("Nakseongdae Station", 37.4768, 126.9637, &[Cafe, Restaurant]),
        ("Seoul Nat'l Univ. Station", 37.4813, 126.9528, &[Cafe, Restaurant]),
        ("Bongcheon Station", 37.4827, 126.9416, &[Restaurant]),
        ("Sindaebang Station", 37.4875, 126.9132, &[Restaurant]),
        ("Boramae Station", 37.4943, 126.9198, &[Cafe, Restaurant]),
        ("Dongjak Station", 37.5076, 126.9510, &[Restaurant]),
        ("Chongshin Univ. Station", 37.4869, 126.9821, &[Restaurant]),
        ("Nambu Bus Terminal Station", 37.4849, 127.0145, &[Restaurant]),
        ("Yangjae Station", 37.4841, 127.0343, &[Cafe, Restaurant, Business]),
        ("Maebong Station", 37.4869, 127.0465, &[Restaurant]),
        ("Dogok Station", 37.4914, 127.0547, &[Cafe, Restaurant]),
    ]
};

impl VenueCatalog {
    pub fn new(venues: Vec<Venue>) -> Self {
        Self { venues }
    }

    /// Built-in catalog of fifty Seoul subway stations.
    pub fn seoul() -> Self {
        let venues = SEOUL_STATIONS
            .iter()
            .map(|(label, lat, lng, features)| Venue {
                label: label.to_string(),
                // 內建資料的座標皆在有效範圍內
                coordinate: Coordinate {
                    lat: *lat,
                    lng: *lng,
                },
                venue_type: "station".to_string(),
                features: features.to_vec(),
            })
            .collect();
        Self { venues }
    }

    /// 從 CSV 檔案載入目錄
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(&path).map_err(MeetError::IoError)?;
        let catalog = Self::from_csv_reader(file)?;
        tracing::info!(
            "Loaded {} venues from {}",
            catalog.len(),
            path.as_ref().display()
        );
        Ok(catalog)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut venues = Vec::new();

        for row in csv_reader.deserialize::<CatalogRow>() {
            let row = row?;
            let coordinate = Coordinate::new(row.lat, row.lng).map_err(|e| {
                MeetError::invalid_input(format!("venue '{}': {}", row.label, e))
            })?;

            let mut features = Vec::new();
            for tag in row.features.split(';').filter(|t| !t.trim().is_empty()) {
                match Feature::from_tag(tag) {
                    Some(feature) if !features.contains(&feature) => features.push(feature),
                    Some(_) => {}
                    None => tracing::warn!(
                        "Skipping unknown feature '{}' on venue '{}'",
                        tag.trim(),
                        row.label
                    ),
                }
            }

            venues.push(Venue {
                label: row.label,
                coordinate,
                venue_type: row.venue_type,
                features,
            });
        }

        if venues.is_empty() {
            return Err(MeetError::invalid_input("venue catalog is empty"));
        }

        Ok(Self { venues })
    }

    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    pub fn len(&self) -> usize {
        self.venues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }

    /// 依名稱查找場所（不分大小寫）
    pub fn find_by_label(&self, label: &str) -> Option<&Venue> {
        let needle = label.trim().to_lowercase();
        self.venues
            .iter()
            .find(|venue| venue.label.to_lowercase() == needle)
    }
}

impl Default for VenueCatalog {
    fn default() -> Self {
        Self::seoul()
    }
}
