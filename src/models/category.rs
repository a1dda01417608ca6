use serde::Serialize;

/// Canonical waste categories. The set is closed: any label the classifier
/// emits outside of it resolves to `Trash`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKey {
    Cardboard,
    Glass,
    Metal,
    Paper,
    Plastic,
    Trash,
}

/// Display metadata for one waste category. Built at compile time, never
/// mutated.
#[derive(Debug, Serialize)]
pub struct CategoryEntry {
    pub key: CategoryKey,
    pub name: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
    pub bin: &'static str,
    pub recyclable: bool,
    pub tip: &'static str,
    pub co2_saving_kg: f64,
}

// Indexed by CategoryKey discriminant.
static CATEGORIES: [CategoryEntry; 6] = [
    CategoryEntry {
        key: CategoryKey::Cardboard,
        name: "Karton",
        color: "#0077b6",
        icon: "📦",
        bin: "Mavi Kutu",
        recyclable: true,
        tip: "Karton kutuları düzleştirerek hacimden tasarruf edin.",
        co2_saving_kg: 0.25,
    },
    CategoryEntry {
        key: CategoryKey::Glass,
        name: "Cam",
        color: "#2a9d8f",
        icon: "🍾",
        bin: "Yeşil Kutu",
        recyclable: true,
        tip: "Cam şişe ve kavanozları kapaksız olarak atın.",
        co2_saving_kg: 0.15,
    },
    CategoryEntry {
        key: CategoryKey::Metal,
        name: "Metal",
        color: "#e9c46a",
        icon: "🥫",
        bin: "Sarı Kutu",
        recyclable: true,
        tip: "Konserve ve içecek kutularını temizleyip ezerek atın.",
        co2_saving_kg: 0.30,
    },
    CategoryEntry {
        key: CategoryKey::Paper,
        name: "Kağıt",
        color: "#f4a261",
        icon: "📰",
        bin: "Mavi Kutu",
        recyclable: true,
        tip: "Gazeteler, dergiler ve ofis kağıtları geri dönüştürülebilir.",
        co2_saving_kg: 0.20,
    },
    CategoryEntry {
        key: CategoryKey::Plastic,
        name: "Plastik",
        color: "#e76f51",
        icon: "🥤",
        bin: "Sarı Kutu",
        recyclable: true,
        tip: "Plastik şişelerin kapaklarını ayrı atın.",
        co2_saving_kg: 0.10,
    },
    CategoryEntry {
        key: CategoryKey::Trash,
        name: "Diğer/Çöp",
        color: "#264653",
        icon: "🗑️",
        bin: "Siyah Kutu",
        recyclable: false,
        tip: "Bu tür atıklar genellikle yakılır veya depolanır.",
        co2_saving_kg: 0.0,
    },
];

impl CategoryKey {
    pub const ALL: [CategoryKey; 6] = [
        CategoryKey::Cardboard,
        CategoryKey::Glass,
        CategoryKey::Metal,
        CategoryKey::Paper,
        CategoryKey::Plastic,
        CategoryKey::Trash,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CategoryKey::Cardboard => "cardboard",
            CategoryKey::Glass => "glass",
            CategoryKey::Metal => "metal",
            CategoryKey::Paper => "paper",
            CategoryKey::Plastic => "plastic",
            CategoryKey::Trash => "trash",
        }
    }

    /// Maps a lowercased classifier label to its category; `None` for
    /// anything outside the closed set.
    pub fn from_label(label: &str) -> Option<CategoryKey> {
        match label {
            "cardboard" => Some(CategoryKey::Cardboard),
            "glass" => Some(CategoryKey::Glass),
            "metal" => Some(CategoryKey::Metal),
            "paper" => Some(CategoryKey::Paper),
            "plastic" => Some(CategoryKey::Plastic),
            "trash" => Some(CategoryKey::Trash),
            _ => None,
        }
    }

    pub fn info(self) -> &'static CategoryEntry {
        &CATEGORIES[self as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn co2_savings_are_non_negative() {
        for key in CategoryKey::ALL {
            assert!(key.info().co2_saving_kg >= 0.0);
        }
    }

    #[test]
    fn only_trash_is_non_recyclable() {
        for key in CategoryKey::ALL {
            assert_eq!(key.info().recyclable, key != CategoryKey::Trash);
        }
    }

    #[test]
    fn table_rows_match_their_keys() {
        for key in CategoryKey::ALL {
            assert_eq!(key.info().key, key);
        }
    }

    #[test]
    fn from_label_round_trips_every_key() {
        for key in CategoryKey::ALL {
            assert_eq!(CategoryKey::from_label(key.as_str()), Some(key));
        }
        assert_eq!(CategoryKey::from_label("garbage classification"), None);
        assert_eq!(CategoryKey::from_label(""), None);
    }
}
