//! Equation-level balancing interface.

use tracing::debug;

use crate::equation::{parse_reaction, Reaction, Validator};
use crate::error::Result;
use crate::formula::{FormulaParser, ParseMode};
use crate::solver::{Balancer, SolverConfig};

/// Configuration for the equation balancer.
#[derive(Debug, Clone)]
pub struct BalancerConfig {
    /// How the formula parser treats characters outside the grammar.
    pub parse_mode: ParseMode,
    /// Run the regex pre-validation before parsing.
    pub validate: bool,
    /// Numerical settings.
    pub solver: SolverConfig,
}

impl Default for BalancerConfig {
    fn default() -> Self {
        Self {
            parse_mode: ParseMode::Strict,
            validate: true,
            solver: SolverConfig::default(),
        }
    }
}

impl BalancerConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the formula parse mode.
    pub fn with_parse_mode(mut self, parse_mode: ParseMode) -> Self {
        self.parse_mode = parse_mode;
        self
    }

    /// Enable or disable regex pre-validation.
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Set the relative magnitude below which a solved coefficient is zero.
    pub fn with_zero_tolerance(mut self, zero_tolerance: f64) -> Self {
        self.solver.zero_tolerance = zero_tolerance;
        self
    }

    /// Set the maximum number of Jacobi sweeps.
    pub fn with_max_sweeps(mut self, max_sweeps: usize) -> Self {
        self.solver.max_sweeps = max_sweeps;
        self
    }

    /// Set the largest multiplier tried when clearing fractions.
    ///
    /// Raise it for reactions whose smallest and largest coefficients
    /// differ by more than four orders of magnitude.
    pub fn with_max_multiplier(mut self, max_multiplier: u64) -> Self {
        self.solver.max_multiplier = max_multiplier;
        self
    }
}

/// Validates, parses and balances equation text.
#[derive(Debug, Clone)]
pub struct EquationBalancer {
    validator: Option<Validator>,
    parser: FormulaParser,
    balancer: Balancer,
}

impl Default for EquationBalancer {
    fn default() -> Self {
        Self::new()
    }
}

impl EquationBalancer {
    /// Create a balancer with the default configuration.
    pub fn new() -> Self {
        Self::with_config(BalancerConfig::default())
    }

    /// Create a balancer with a custom configuration.
    pub fn with_config(config: BalancerConfig) -> Self {
        Self {
            validator: config.validate.then(Validator::new),
            parser: FormulaParser::with_mode(config.parse_mode),
            balancer: Balancer::with_config(config.solver),
        }
    }

    /// Validate and parse an equation without balancing it.
    pub fn parse_reaction(&self, equation: &str) -> Result<Reaction> {
        if let Some(validator) = &self.validator {
            validator.validate(equation)?;
        }
        parse_reaction(equation, &self.parser)
    }

    /// Balance an equation, e.g. `H2 + O2 -> H2O` into `2H2 + O2 -> 2H2O`.
    pub fn balance(&self, equation: &str) -> Result<String> {
        debug!(equation, "balancing");
        let mut reaction = self.parse_reaction(equation)?;
        self.balancer.balance(&mut reaction)?;
        Ok(reaction.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BalanceError, ErrorKind};

    #[test]
    fn test_config_builder() {
        let config = BalancerConfig::new()
            .with_parse_mode(ParseMode::Lenient)
            .with_validation(false)
            .with_zero_tolerance(1e-6)
            .with_max_sweeps(10)
            .with_max_multiplier(50);
        assert_eq!(config.parse_mode, ParseMode::Lenient);
        assert!(!config.validate);
        assert_eq!(config.solver.zero_tolerance, 1e-6);
        assert_eq!(config.solver.max_sweeps, 10);
        assert_eq!(config.solver.max_multiplier, 50);
    }

    #[test]
    fn test_missing_arrow_kind_depends_on_validation() {
        let err = EquationBalancer::new().balance("H2 + O2").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let unvalidated =
            EquationBalancer::with_config(BalancerConfig::new().with_validation(false));
        let err = unvalidated.balance("H2 + O2").unwrap_err();
        assert_eq!(err, BalanceError::ArrowCount { found: 0 });
    }

    #[test]
    fn test_lenient_mode() {
        let strict = EquationBalancer::with_config(BalancerConfig::new().with_validation(false));
        assert!(strict.balance("H2 + O2 -> H2O.").is_err());

        let lenient = EquationBalancer::with_config(
            BalancerConfig::new()
                .with_validation(false)
                .with_parse_mode(ParseMode::Lenient),
        );
        assert_eq!(lenient.balance("H2 + O2 -> H2O.").unwrap(), "2H2 + O2 -> 2H2O");
    }

    #[test]
    fn test_parse_reaction_keeps_input_coefficients() {
        let reaction = EquationBalancer::new()
            .parse_reaction("2H2 + O2 -> 2H2O")
            .unwrap();
        assert_eq!(reaction.coefficients(), vec![2.0, 1.0, 2.0]);
    }

    #[test]
    fn test_multiplier_limit() {
        let limited =
            EquationBalancer::with_config(BalancerConfig::new().with_max_multiplier(1));
        let err = limited.balance("Fe + O2 -> Fe2O3").unwrap_err();
        assert_eq!(err, BalanceError::NoIntegerSolution { limit: 1 });
    }
}
