// Room and extras catalogs. Both are process-wide, read-mostly tables:
// rooms are a fixed built-in list that administrators can override field
// by field (never delete), extras are a small CRUD list of per-guest
// paid add-ons.

use dashmap::DashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("unknown room: {0}")]
    RoomNotFound(String),

    #[error("unknown extra: {0}")]
    ExtraNotFound(String),

    #[error("price must be non-negative, got {0}")]
    NegativePrice(f64),
}

/// A bookable unit with a nightly rate and descriptive metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: u32,
    pub slug: String,
    pub name: String,
    pub nightly_rate: f64,
    pub description: String,
    pub features: Vec<String>,
    pub image: String,
    pub highlight: String,
}

/// Partial, field-replacing update applied on top of a room's current
/// values. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoomUpdate {
    pub name: Option<String>,
    pub nightly_rate: Option<f64>,
    pub description: Option<String>,
    pub features: Option<Vec<String>>,
    pub image: Option<String>,
    pub highlight: Option<String>,
}

/// An optional paid add-on, charged per guest (not per stay).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Extra {
    pub id: String,
    pub label: String,
    pub price: f64,
}

fn default_rooms() -> Vec<Room> {
    vec![
        Room {
            id: 1,
            slug: "eva".into(),
            name: "Eva".into(),
            nightly_rate: 120.0,
            description: "Une chambre romantique avec vue sur le jardin, décorée avec raffinement."
                .into(),
            features: vec!["Double".into(), "Balcon".into(), "Jacuzzi".into()],
            image: "https://images.unsplash.com/photo-1611892440504-42a792e24d32?auto=format&fit=crop&w=1200&q=80".into(),
            highlight: "Chambre romantique avec balcon".into(),
        },
        Room {
            id: 2,
            slug: "sohan".into(),
            name: "Sohan".into(),
            nightly_rate: 140.0,
            description: "Une suite spacieuse avec cheminée et baignoire spa pour un séjour luxueux."
                .into(),
            features: vec![
                "Suite".into(),
                "Cheminée".into(),
                "Vue panoramique".into(),
            ],
            image: "https://images.unsplash.com/photo-1582719478250-c89cae4dc85b?auto=format&fit=crop&w=1200&q=80".into(),
            highlight: "Suite spacieuse avec cheminée".into(),
        },
        Room {
            id: 3,
            slug: "eden".into(),
            name: "Eden".into(),
            nightly_rate: 110.0,
            description: "Une chambre cosy avec décoration champêtre et accès direct au jardin."
                .into(),
            features: vec![
                "Simple ou double".into(),
                "Jardin privé".into(),
                "Petit déjeuner inclus".into(),
            ],
            image: "https://images.unsplash.com/photo-1618773928121-c32242e63f39?auto=format&fit=crop&w=1200&q=80".into(),
            highlight: "Chambre cosy avec jardin privé".into(),
        },
    ]
}

fn default_extras() -> Vec<Extra> {
    vec![
        Extra {
            id: "breakfast".into(),
            label: "Petit déjeuner (20€/personne)".into(),
            price: 20.0,
        },
        Extra {
            id: "spa".into(),
            label: "Accès spa (35€/personne)".into(),
            price: 35.0,
        },
    ]
}

/// Built-in room list plus administrative overrides. Overrides replace
/// fields of a default room; a reset drops the override entirely.
pub struct RoomCatalog {
    defaults: Vec<Room>,
    overrides: DashMap<String, Room>,
}

impl RoomCatalog {
    pub fn with_defaults() -> Self {
        Self {
            defaults: default_rooms(),
            overrides: DashMap::new(),
        }
    }

    /// All rooms, most expensive first (the public site lists them that way).
    pub fn list(&self) -> Vec<Room> {
        let mut rooms: Vec<Room> = self
            .defaults
            .iter()
            .map(|room| {
                self.overrides
                    .get(&room.slug)
                    .map(|entry| entry.clone())
                    .unwrap_or_else(|| room.clone())
            })
            .collect();
        rooms.sort_by(|a, b| b.nightly_rate.total_cmp(&a.nightly_rate));
        rooms
    }

    pub fn get(&self, slug: &str) -> Option<Room> {
        if let Some(entry) = self.overrides.get(slug) {
            return Some(entry.clone());
        }
        self.defaults.iter().find(|room| room.slug == slug).cloned()
    }

    /// Apply an administrative override on top of the room's current values.
    pub fn update(&self, slug: &str, update: RoomUpdate) -> Result<Room, CatalogError> {
        let mut room = self
            .get(slug)
            .ok_or_else(|| CatalogError::RoomNotFound(slug.to_string()))?;
        if let Some(rate) = update.nightly_rate {
            if rate < 0.0 {
                return Err(CatalogError::NegativePrice(rate));
            }
            room.nightly_rate = rate;
        }
        if let Some(name) = update.name {
            room.name = name;
        }
        if let Some(description) = update.description {
            room.description = description;
        }
        if let Some(features) = update.features {
            room.features = features;
        }
        if let Some(image) = update.image {
            room.image = image;
        }
        if let Some(highlight) = update.highlight {
            room.highlight = highlight;
        }
        self.overrides.insert(slug.to_string(), room.clone());
        Ok(room)
    }

    /// Drop any override and return the room to its built-in definition.
    pub fn reset(&self, slug: &str) -> Result<Room, CatalogError> {
        self.overrides.remove(slug);
        self.get(slug)
            .ok_or_else(|| CatalogError::RoomNotFound(slug.to_string()))
    }
}

impl Default for RoomCatalog {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// CRUD list of optional add-ons, kept in insertion order.
pub struct ExtrasCatalog {
    extras: RwLock<Vec<Extra>>,
}

impl ExtrasCatalog {
    pub fn with_defaults() -> Self {
        Self {
            extras: RwLock::new(default_extras()),
        }
    }

    pub fn empty() -> Self {
        Self {
            extras: RwLock::new(Vec::new()),
        }
    }

    pub fn list(&self) -> Vec<Extra> {
        self.extras.read().clone()
    }

    pub fn add(&self, label: &str, price: f64) -> Result<Extra, CatalogError> {
        if price < 0.0 {
            return Err(CatalogError::NegativePrice(price));
        }
        let extra = Extra {
            id: format!("extra_{}", rand::random::<u32>()),
            label: label.to_string(),
            price,
        };
        self.extras.write().push(extra.clone());
        Ok(extra)
    }

    pub fn update(
        &self,
        id: &str,
        label: Option<String>,
        price: Option<f64>,
    ) -> Result<Extra, CatalogError> {
        if let Some(price) = price {
            if price < 0.0 {
                return Err(CatalogError::NegativePrice(price));
            }
        }
        let mut extras = self.extras.write();
        let extra = extras
            .iter_mut()
            .find(|extra| extra.id == id)
            .ok_or_else(|| CatalogError::ExtraNotFound(id.to_string()))?;
        if let Some(label) = label {
            extra.label = label;
        }
        if let Some(price) = price {
            extra.price = price;
        }
        Ok(extra.clone())
    }

    pub fn remove(&self, id: &str) -> Result<(), CatalogError> {
        let mut extras = self.extras.write();
        let before = extras.len();
        extras.retain(|extra| extra.id != id);
        if extras.len() == before {
            return Err(CatalogError::ExtraNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Snapshot the labels of the selected extras, in catalog order.
    /// Unknown ids are ignored. Bookings store these plain strings so a
    /// later catalog edit never rewrites a historical reservation.
    pub fn resolve_labels(&self, selected_ids: &[String]) -> Vec<String> {
        self.extras
            .read()
            .iter()
            .filter(|extra| selected_ids.iter().any(|id| *id == extra.id))
            .map(|extra| extra.label.clone())
            .collect()
    }

    /// The selected extras themselves, for pricing.
    pub fn resolve(&self, selected_ids: &[String]) -> Vec<Extra> {
        self.extras
            .read()
            .iter()
            .filter(|extra| selected_ids.iter().any(|id| *id == extra.id))
            .cloned()
            .collect()
    }
}

impl Default for ExtrasCatalog {
    fn default() -> Self {
        Self::with_defaults()
    }
}
