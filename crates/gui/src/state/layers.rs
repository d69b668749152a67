//! Registry of extrusion layers added to the map.

/// Ordered, unique list of extrusion layer ids
#[derive(Default, Debug, Clone)]
pub struct LayerRegistry {
    ids: Vec<String>,
}

impl LayerRegistry {
    /// Append an id. Returns false if it was already registered.
    pub fn push(&mut self, id: String) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Remove an id. Returns false if it was not registered.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.ids.iter().position(|s| s == id) {
            Some(pos) => {
                self.ids.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
