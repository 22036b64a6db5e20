use orderdesk_shared::{PaymentStatus, ProcessStatus};

use crate::error::{OrderError, OrderResult};

/// Checks a requested process stage change without applying it.
///
/// Legal moves:
/// - one stage forward, except into Concluded
/// - Delivered | Returned to Concluded once payment is Closed
/// - any non-terminal stage to Canceled
pub fn validate_transition(
    current: ProcessStatus,
    target: ProcessStatus,
    payment: PaymentStatus,
) -> OrderResult<()> {
    let legal = match target {
        ProcessStatus::Canceled => !current.is_terminal(),
        ProcessStatus::Concluded => {
            current == ProcessStatus::DeliveredOrReturned && payment == PaymentStatus::Closed
        }
        _ => current.successor() == Some(target),
    };

    if legal {
        Ok(())
    } else {
        Err(OrderError::IllegalTransition {
            from: current,
            to: target,
        })
    }
}

/// [`validate_transition`] over raw codes
pub fn validate_transition_codes(current: u8, target: u8, payment: u8) -> OrderResult<()> {
    validate_transition(
        ProcessStatus::try_from(current)?,
        ProcessStatus::try_from(target)?,
        PaymentStatus::try_from(payment)?,
    )
}

/// Every stage reachable from `current` in one move.
pub fn legal_targets(current: ProcessStatus, payment: PaymentStatus) -> Vec<ProcessStatus> {
    ProcessStatus::ALL
        .into_iter()
        .filter(|target| validate_transition(current, *target, payment).is_ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_by_one() {
        assert!(validate_transition(ProcessStatus::New, ProcessStatus::Preparation, PaymentStatus::Open).is_ok());
        assert!(validate_transition(ProcessStatus::None, ProcessStatus::New, PaymentStatus::Open).is_ok());
        assert!(validate_transition(ProcessStatus::New, ProcessStatus::Production, PaymentStatus::Open).is_err());
        assert!(validate_transition(ProcessStatus::Quality, ProcessStatus::Production, PaymentStatus::Open).is_err());
        assert!(validate_transition(ProcessStatus::Quality, ProcessStatus::Quality, PaymentStatus::Open).is_err());
    }

    #[test]
    fn test_conclusion_requires_closed_payment() {
        assert!(validate_transition_codes(7, 8, 3).is_ok());
        assert_eq!(
            validate_transition_codes(7, 8, 1),
            Err(OrderError::IllegalTransition {
                from: ProcessStatus::DeliveredOrReturned,
                to: ProcessStatus::Concluded,
            })
        );
        assert!(validate_transition_codes(6, 8, 3).is_err());
    }

    #[test]
    fn test_cancel_from_any_non_terminal() {
        for payment in PaymentStatus::ALL {
            assert!(validate_transition_codes(3, 9, payment.code()).is_ok());
        }
        for code in 0..=7 {
            assert!(validate_transition_codes(code, 9, 1).is_ok());
        }
        assert!(validate_transition_codes(8, 9, 3).is_err());
        assert!(validate_transition_codes(9, 9, 3).is_err());
    }

    #[test]
    fn test_terminal_states_have_no_exit() {
        for payment in PaymentStatus::ALL {
            assert!(legal_targets(ProcessStatus::Concluded, payment).is_empty());
            assert!(legal_targets(ProcessStatus::Canceled, payment).is_empty());
        }
    }

    #[test]
    fn test_legal_targets() {
        assert_eq!(
            legal_targets(ProcessStatus::DeliveredOrReturned, PaymentStatus::Closed),
            vec![ProcessStatus::Concluded, ProcessStatus::Canceled]
        );
        assert_eq!(
            legal_targets(ProcessStatus::DeliveredOrReturned, PaymentStatus::Partial),
            vec![ProcessStatus::Canceled]
        );
        assert_eq!(
            legal_targets(ProcessStatus::Finishing, PaymentStatus::Open),
            vec![ProcessStatus::Completed, ProcessStatus::Canceled]
        );
    }

    #[test]
    fn test_unknown_codes() {
        assert!(matches!(validate_transition_codes(12, 1, 1), Err(OrderError::UnknownStatus(_))));
        assert!(matches!(validate_transition_codes(1, 2, 6), Err(OrderError::UnknownStatus(_))));
    }
}
