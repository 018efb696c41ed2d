//! WASM bindings for Stoich Core.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmBalancer, balance_equation } from 'stoich_core';
//!
//! await init();
//!
//! balance_equation('H2 + O2 -> H2O'); // "2H2 + O2 -> 2H2O"
//!
//! const balancer = WasmBalancer.with_config(false, false, 10000);
//! balancer.balance('Fe + O2 -> Fe2O3.'); // "4Fe + 3O2 -> 2Fe2O3"
//! ```

use wasm_bindgen::prelude::*;

use crate::balancer::{BalancerConfig, EquationBalancer};
use crate::formula::ParseMode;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// WASM-compatible equation balancer.
#[wasm_bindgen]
pub struct WasmBalancer {
    balancer: EquationBalancer,
}

#[wasm_bindgen]
impl WasmBalancer {
    /// Create a balancer with the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmBalancer {
        WasmBalancer {
            balancer: EquationBalancer::new(),
        }
    }

    /// Create a balancer with custom settings.
    ///
    /// # Arguments
    /// * `strict` - Reject characters outside the formula grammar (default: true)
    /// * `validate` - Run the regex pre-validation (default: true)
    /// * `max_multiplier` - Largest multiplier tried when clearing fractions (default: 10000)
    #[wasm_bindgen]
    pub fn with_config(strict: bool, validate: bool, max_multiplier: u64) -> WasmBalancer {
        let parse_mode = if strict {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        };
        let config = BalancerConfig::new()
            .with_parse_mode(parse_mode)
            .with_validation(validate)
            .with_max_multiplier(max_multiplier);

        WasmBalancer {
            balancer: EquationBalancer::with_config(config),
        }
    }

    /// Balance an equation, throwing the error message on failure.
    #[wasm_bindgen]
    pub fn balance(&self, equation: &str) -> Result<String, JsValue> {
        self.balancer
            .balance(equation)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl Default for WasmBalancer {
    fn default() -> Self {
        Self::new()
    }
}

/// Balance an equation with the default configuration.
#[wasm_bindgen]
pub fn balance_equation(equation: &str) -> Result<String, JsValue> {
    crate::balance(equation).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
