mod loader;
mod nom_parser;

pub use self::{
    loader::{load, parse_source},
    nom_parser::{parse_file, TreeDef, TreeRootDef, TreeSource},
};
