//! Synthetic names for debundled modules

use std::path::{Component, Path};

use crate::module::ModuleId;

pub const MODULE_PREFIX: &str = "mod_";
pub const MODULE_EXTENSION: &str = ".js";
/// File holding everything that was not a module registration
pub const MAIN_FILE_NAME: &str = "main.js";

/// `mod_<id>`, the name a module is imported by
pub fn module_name(id: &ModuleId) -> String {
    format!("{}{}", MODULE_PREFIX, id.key())
}

pub fn module_file_name(id: &ModuleId) -> String {
    format!("{}{}", module_name(id), MODULE_EXTENSION)
}

/// Relative import specifier for a dependency, e.g. `./mod_7`
pub fn import_source(id: &ModuleId) -> String {
    format!("./{}", module_name(id))
}

/// True when `file_name` names a file directly inside a directory
pub fn is_plain_file_name(file_name: &str) -> bool {
    if file_name.contains(&['/', '\\', '\0'][..]) {
        return false;
    }
    let mut components = Path::new(file_name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_names() {
        let id = ModuleId::new("42");
        assert_eq!(module_name(&id), "mod_42");
        assert_eq!(module_file_name(&id), "mod_42.js");
        assert_eq!(import_source(&id), "./mod_42");
    }

    #[test]
    fn test_distinct_ids_get_distinct_names() {
        let ids = ["1", "01", "1.5", "main", "a b", ""];
        let mut names: Vec<_> = ids.iter().map(|id| module_file_name(&ModuleId::new(*id))).collect();
        names.push(MAIN_FILE_NAME.to_string());
        let count = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), count);
    }

    #[test]
    fn test_plain_file_names() {
        assert!(is_plain_file_name("mod_1.js"));
        assert!(is_plain_file_name("mod_...js"));
        assert!(!is_plain_file_name("mod_../../etc/passwd.js"));
        assert!(!is_plain_file_name("mod_a\\b.js"));
        assert!(!is_plain_file_name(".."));
        assert!(!is_plain_file_name(""));
    }
}
