//! Fixed A4 grid: three full-width images stacked per portrait page.
//!
//! Slots are assigned from the position of an identifier in the request,
//! not from how many images were actually placed, so entries that could not
//! be resolved leave a blank slot behind.

/// A4 portrait width in millimetres.
pub const PAGE_WIDTH_MM: f32 = 210.0;
/// A4 portrait height in millimetres.
pub const PAGE_HEIGHT_MM: f32 = 297.0;
/// Slots on every page.
pub const IMAGES_PER_PAGE: usize = 3;
/// Top edge of each slot, measured from the top of the page.
pub const SLOT_TOPS_MM: [f32; IMAGES_PER_PAGE] = [0.0, 101.45, 202.9];
/// Images span the full page width.
pub const SLOT_WIDTH_MM: f32 = PAGE_WIDTH_MM;
/// Fixed image height; images are stretched to fill the box.
pub const SLOT_HEIGHT_MM: f32 = 94.1;

/// Fetched bytes for one requested identifier.
#[derive(Clone, PartialEq, Eq)]
pub struct SheetImage {
    /// Identifier as requested.
    pub id: String,
    /// Undecoded image payload.
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for SheetImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetImage")
            .field("id", &self.id)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Page and slot an entry at `index` lands in.
pub fn slot_for(index: usize) -> (usize, usize) {
    (index / IMAGES_PER_PAGE, index % IMAGES_PER_PAGE)
}

/// Distance from the bottom of the page to the bottom edge of `slot`.
/// PDF coordinates grow upwards from the lower-left corner.
pub fn slot_bottom_mm(slot: usize) -> f32 {
    PAGE_HEIGHT_MM - SLOT_TOPS_MM[slot] - SLOT_HEIGHT_MM
}

/// One A4 page with its three slots, top to bottom.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetPage {
    /// Slot contents; `None` is a blank slot.
    pub slots: [Option<SheetImage>; IMAGES_PER_PAGE],
}

impl SheetPage {
    /// True when no slot holds an image.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

/// Page-by-page placement of every resolved entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetPlan {
    pages: Vec<SheetPage>,
}

impl SheetPlan {
    /// Build a plan from per-index resolution results.
    ///
    /// Slots come from the request index, so `None` entries leave a blank
    /// slot. Pages without any placed image are dropped, but the plan always
    /// holds at least one page.
    pub fn from_entries(entries: Vec<Option<SheetImage>>) -> Self {
        let mut pages: Vec<SheetPage> = Vec::new();

        for (index, entry) in entries.into_iter().enumerate() {
            let (page, slot) = slot_for(index);
            if slot == 0 {
                pages.push(SheetPage::default());
            }
            pages[page].slots[slot] = entry;
        }

        pages.retain(|page| !page.is_empty());
        if pages.is_empty() {
            pages.push(SheetPage::default());
        }

        Self { pages }
    }

    /// Pages in output order.
    pub fn pages(&self) -> &[SheetPage] {
        &self.pages
    }

    /// Consume the plan, yielding its pages.
    pub fn into_pages(self) -> Vec<SheetPage> {
        self.pages
    }

    /// Number of slots holding an image.
    pub fn placed(&self) -> usize {
        self.pages
            .iter()
            .flat_map(|page| page.slots.iter())
            .filter(|slot| slot.is_some())
            .count()
    }
}
