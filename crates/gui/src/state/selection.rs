/// Selected extrusion layer (at most one)
#[derive(Default, Debug)]
pub struct LayerSelection {
    selected: Option<String>,
    /// Version counter for selection changes (viewport repaint)
    pub version: u64,
}

impl LayerSelection {
    pub fn get(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    /// Select a layer, returning the previously selected one.
    pub fn select(&mut self, id: String) -> Option<String> {
        self.version += 1;
        self.selected.replace(id)
    }

    /// Clear selection, returning what was selected.
    pub fn clear(&mut self) -> Option<String> {
        let prev = self.selected.take();
        if prev.is_some() {
            self.version += 1;
        }
        prev
    }
}
