//! New-session capabilities

use serde_json::{json, Value};

/// Browser options sent with the new-session request
#[derive(Debug, Clone)]
pub struct Capabilities {
    headless: bool,
    window_width: u32,
    window_height: u32,
}

impl Capabilities {
    /// Chrome with the suite's default options
    pub fn chrome() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
        }
    }

    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn window_size(mut self, width: u32, height: u32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }

    /// W3C new-session request body
    pub fn to_wire(&self) -> Value {
        let mut args = Vec::new();
        if self.headless {
            args.push("--headless=new".to_string());
        }
        args.push("--no-sandbox".to_string());
        args.push("--disable-dev-shm-usage".to_string());
        args.push("--disable-gpu".to_string());
        args.push(format!(
            "--window-size={},{}",
            self.window_width, self.window_height
        ));

        json!({
            "capabilities": {
                "alwaysMatch": {
                    "browserName": "chrome",
                    "goog:chromeOptions": {
                        "args": args,
                    }
                }
            }
        })
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::chrome()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_of(wire: &Value) -> Vec<String> {
        wire["capabilities"]["alwaysMatch"]["goog:chromeOptions"]["args"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_default_wire_shape() {
        let wire = Capabilities::chrome().to_wire();
        assert_eq!(
            wire["capabilities"]["alwaysMatch"]["browserName"],
            "chrome"
        );
        let args = args_of(&wire);
        assert!(args.contains(&"--headless=new".to_string()));
        assert!(args.contains(&"--window-size=1920,1080".to_string()));
    }

    #[test]
    fn test_headed_omits_headless_arg() {
        let wire = Capabilities::chrome().headless(false).to_wire();
        let args = args_of(&wire);
        assert!(!args.iter().any(|a| a.starts_with("--headless")));
    }

    #[test]
    fn test_window_size_override() {
        let wire = Capabilities::chrome().window_size(1280, 720).to_wire();
        let args = args_of(&wire);
        assert!(args.contains(&"--window-size=1280,720".to_string()));
    }
}
