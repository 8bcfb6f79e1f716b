pub mod models;
pub mod schema;
pub mod sqlite;
pub mod tags;

use crate::errors::Result;
use models::{NewPaste, Paste, SearchQuery};

/// Operations the UI layer calls into. Every mutation is atomic.
pub trait PasteStorage {
    fn create_paste(&self, paste: NewPaste) -> Result<Paste>;
    fn update_paste(&self, id: i64, paste: NewPaste) -> Result<Paste>;
    fn touch_paste(&self, id: i64) -> Result<()>;
    fn delete_paste(&self, id: i64) -> Result<bool>;
    fn get_paste(&self, id: i64) -> Result<Paste>;
    fn tags_for(&self, id: i64) -> Result<Vec<String>>;
    fn search(&self, query: SearchQuery) -> Result<Vec<Paste>>;
    fn list_tag_names(&self) -> Result<Vec<String>>;

    fn search_pastes(&self, query: &str) -> Result<Vec<Paste>> {
        self.search(SearchQuery::new(query))
    }
}
