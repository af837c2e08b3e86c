use crate::domain::chips::Chips;
use crate::engine::errors::EngineError;

/// Проверка ставки перед началом раунда: больше нуля и не больше баланса.
pub fn validate_stake(stake: Chips, balance: Chips) -> Result<(), EngineError> {
    if stake.is_zero() {
        return Err(EngineError::ZeroStake);
    }
    ensure_stake_covered(stake, balance)
}

/// Хватает ли баланса на (дополнительную) ставку.
pub fn ensure_stake_covered(stake: Chips, balance: Chips) -> Result<(), EngineError> {
    if stake > balance {
        return Err(EngineError::StakeExceedsBalance { stake, balance });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_stake_rejected_even_with_balance() {
        assert_eq!(validate_stake(Chips(0), Chips(100)), Err(EngineError::ZeroStake));
    }

    #[test]
    fn stake_equal_to_balance_is_allowed() {
        assert!(validate_stake(Chips(100), Chips(100)).is_ok());
    }

    #[test]
    fn stake_above_balance_reports_both_amounts() {
        let err = validate_stake(Chips(101), Chips(100)).unwrap_err();
        assert_eq!(
            err,
            EngineError::StakeExceedsBalance {
                stake: Chips(101),
                balance: Chips(100)
            }
        );
        assert!(err.is_invalid_stake());
    }
}
