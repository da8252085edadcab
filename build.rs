use std::env;
use std::fs;
use std::path::PathBuf;

use indoc::formatdoc;

fn main() {
    println!("cargo:rerun-if-changed=assets/help.md");
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    let help = fs::read_to_string("assets/help.md").expect("assets/help.md is readable");
    let generated = formatdoc! {
        r##"
        /// Help text embedded from assets/help.md at build time.
        pub const HELP_TEXT: &str = r#"{help}"#;
        "##
    };
    fs::write(out_dir.join("generated_help.rs"), generated).expect("generated help is writable");
}
