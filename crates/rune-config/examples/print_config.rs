/// Example program to print the loaded configuration
///
/// Run with: cargo run -p rune-config --example print_config

fn main() {
    let config = rune_config::RuneConfig::load();
    let picker = &config.date_picker;

    println!("=== Date Picker Configuration ===\n");

    println!("Formatting:");
    println!("  Input Format: {}", picker.input_format);
    println!("  Locale: {}", picker.locale);
    println!("  Pattern: {}", picker.pattern);
    println!("  Placeholder: {:?}", picker.placeholder);
    println!();

    println!("Range:");
    println!("  Min Date: {:?}", picker.min_date);
    println!("  Max Date: {:?}", picker.max_date);
    println!("  Default Value: {:?}", picker.default_value);
    println!();

    println!("Behaviour:");
    println!("  Close On Blur: {}", picker.close_on_blur);
    println!("  Close On Select: {}", picker.close_on_select);
    println!("  Allow Input: {}", picker.allow_input);
    println!("  Default Open: {}", picker.default_open);
    println!("  Clearable: {}", picker.clearable);
    println!("  Placement: {:?}", picker.placement);
    println!("  Duration: {}", picker.duration);
    println!();

    match toml::to_string_pretty(&config) {
        Ok(toml_str) => {
            println!("=== Serialized Configuration ===");
            println!("{}", toml_str);
        }
        Err(e) => {
            eprintln!("Failed to serialize config: {}", e);
        }
    }
}
