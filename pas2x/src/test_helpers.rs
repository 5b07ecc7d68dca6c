use std::fs;
use std::path::PathBuf;

pub fn read_resource(name: &'static str) -> String {
    fs::read_to_string(resource_path(name)).expect("Unable to read file")
}

pub fn resource_path(name: &'static str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("resources/test");
    path.push(name);
    path
}
