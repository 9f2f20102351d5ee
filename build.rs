use std::fs;

/// Keys `Config` reads from the bundled defaults; each must be a string.
const STRING_KEYS: [&str; 5] = [
    "content_dir",
    "static_dir",
    "output_dir",
    "template",
    "basepath",
];

fn main() {
    let config_path = "src/default_config.toml";
    println!("cargo:rerun-if-changed={}", config_path);

    let content = fs::read_to_string(config_path).expect("Failed to read default_config.toml");
    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid default_config.toml: {}", e),
    };

    for key in STRING_KEYS {
        match table.get(key) {
            Some(toml::Value::String(_)) => {}
            Some(other) => panic!(
                "default_config.toml: `{}` must be a string, found {}",
                key,
                other.type_str()
            ),
            None => panic!("default_config.toml: missing `{}`", key),
        }
    }

    if let Some(unknown) = table.keys().find(|k| !STRING_KEYS.contains(&k.as_str())) {
        panic!("default_config.toml: unknown key `{}`", unknown);
    }
}
