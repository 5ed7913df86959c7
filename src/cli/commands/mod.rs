mod extract;
mod list;
mod lookup;
mod refresh;
mod remove;
mod season;
mod show;
mod synopsis;

pub use extract::cmd_extract;
pub use list::cmd_list;
pub use lookup::cmd_lookup;
pub use refresh::cmd_refresh;
pub use remove::cmd_remove;
pub use season::cmd_season;
pub use show::cmd_show;
pub use synopsis::cmd_synopsis;
