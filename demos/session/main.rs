use kvcache::{
    env::load_env_var,
    get_instance,
    logger::setup_logger,
    CacheError,
};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::process::exit;

#[derive(Debug, Serialize, Deserialize)]
struct Session {
    user_id: String,
    email: String,
    customer_id: Option<String>,
}

fn session_key(user_id: &str) -> String {
    format!("session:user:{}", user_id)
}

fn main() {
    if let Err(e) = setup_logger() {
        eprintln!("logger already installed: {}", e);
    }

    let user_id = load_env_var("KVCACHE_DEMO_USER", "42");
    let email = load_env_var("KVCACHE_DEMO_EMAIL", "demo@example.com");
    let kv = get_instance();
    let key = session_key(&user_id);

    let session = Session {
        user_id: user_id.clone(),
        email,
        customer_id: None,
    };
    if let Err(e) = kv.set_as(&key, &session) {
        error!("could not cache session for {}: {}", user_id, e);
        exit(1);
    }
    info!("cached {} ({} entries)", key, kv.len());

    match kv.get_as::<Session>(&key) {
        Ok(Some(found)) => info!("session hit: {:?}", found),
        Ok(None) => warn!("session miss for {}", key),
        Err(e) => error!("session for {} unreadable: {}", key, e),
    }

    match kv.get_as::<u64>(&key) {
        Err(CacheError::ConversionType) => info!("reading {} as a number fails as expected", key),
        other => warn!("unexpected typed read: {:?}", other),
    }

    kv.delete(&key);
    info!("after delete, present={}", kv.contains_key(&key));

    kv.set("greeting", "hello");
    kv.clear();
    info!("after clear, empty={}", kv.is_empty());
}
