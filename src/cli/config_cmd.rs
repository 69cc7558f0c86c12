use crate::models::config::{self, BACKEND_URL_ENV};

pub fn handle_config(url: Option<String>) {
    let mut user_config = config::load_config();

    match url {
        None => {
            println!("Backend URL: {}", user_config.backend_url);
            let resolved = user_config.resolved_backend_url();
            if resolved != user_config.backend_url {
                println!("Overridden by {}: {}", BACKEND_URL_ENV, resolved);
            }
            println!();
            println!("To change: problist config <url>");
        }
        Some(new_url) => {
            let new_url = new_url.trim().trim_end_matches('/').to_string();
            if new_url.is_empty() {
                eprintln!("Backend URL cannot be empty");
                std::process::exit(1);
            }
            if user_config.backend_url == new_url {
                println!("Backend URL is already set to {}", new_url);
                return;
            }

            let old_url = std::mem::replace(&mut user_config.backend_url, new_url);
            if let Err(e) = config::save_config(&user_config) {
                eprintln!("Failed to save config: {}", e);
                std::process::exit(1);
            }

            println!(
                "Backend URL changed from {} to {}",
                old_url, user_config.backend_url
            );
        }
    }
}
