use crate::error::AppError;
use thiserror::Error;

/// Why a reservation was not admitted.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum BookingRejection {
    #[error("Turno no encontrado")]
    TurnoNotFound,
    #[error("No hay lugares disponibles en este turno")]
    CapacityExceeded,
    #[error("El usuario ya reservó este turno")]
    DuplicateBooking,
    #[error("No se puede reducir la capacidad a {capacidad}: ya existen {reservas} reservas")]
    CapacityBelowReservas { capacidad: i32, reservas: i64 },
}

impl From<BookingRejection> for AppError {
    fn from(rejection: BookingRejection) -> Self {
        match rejection {
            BookingRejection::TurnoNotFound => AppError::NotFound(rejection.to_string()),
            BookingRejection::CapacityExceeded
            | BookingRejection::DuplicateBooking
            | BookingRejection::CapacityBelowReservas { .. } => AppError::BadRequest(rejection.to_string()),
        }
    }
}

/// State of a slot as seen from inside the booking transaction.
#[derive(Debug, Clone, Copy)]
pub struct SlotOccupancy {
    pub capacidad: i32,
    pub reservas: i64,
    /// The requesting usuario already holds a reservation for this slot.
    pub already_booked: bool,
}

/// Decide whether one more reservation fits. `None` means the slot does not exist.
///
/// Checks run in a fixed order: existence, duplicate, capacity.
pub fn check_admission(slot: Option<SlotOccupancy>) -> Result<(), BookingRejection> {
    let slot = slot.ok_or(BookingRejection::TurnoNotFound)?;

    if slot.already_booked {
        return Err(BookingRejection::DuplicateBooking);
    }
    if slot.reservas >= i64::from(slot.capacidad) {
        return Err(BookingRejection::CapacityExceeded);
    }
    Ok(())
}

/// A slot's capacity may shrink only down to the reservations it already holds.
pub fn check_capacity_change(capacidad: i32, reservas: i64) -> Result<(), BookingRejection> {
    if i64::from(capacidad) < reservas {
        return Err(BookingRejection::CapacityBelowReservas { capacidad, reservas });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(capacidad: i32, reservas: i64, already_booked: bool) -> Option<SlotOccupancy> {
        Some(SlotOccupancy { capacidad, reservas, already_booked })
    }

    #[test]
    fn test_missing_slot_is_not_found() {
        assert_eq!(check_admission(None), Err(BookingRejection::TurnoNotFound));
    }

    #[test]
    fn test_admits_while_below_capacity() {
        assert_eq!(check_admission(slot(1, 0, false)), Ok(()));
        assert_eq!(check_admission(slot(3, 2, false)), Ok(()));
    }

    #[test]
    fn test_full_slot_is_rejected() {
        assert_eq!(check_admission(slot(1, 1, false)), Err(BookingRejection::CapacityExceeded));
        assert_eq!(check_admission(slot(2, 5, false)), Err(BookingRejection::CapacityExceeded));
    }

    #[test]
    fn test_duplicate_is_reported_even_when_slot_is_full() {
        assert_eq!(check_admission(slot(1, 1, true)), Err(BookingRejection::DuplicateBooking));
        assert_eq!(check_admission(slot(2, 1, true)), Err(BookingRejection::DuplicateBooking));
        assert_eq!(check_admission(slot(1, 1, false)), Err(BookingRejection::CapacityExceeded));
    }

    #[test]
    fn test_zero_capacity_never_admits() {
        assert_eq!(check_admission(slot(0, 0, false)), Err(BookingRejection::CapacityExceeded));
    }

    #[test]
    fn test_capacity_may_shrink_down_to_existing_reservas() {
        assert_eq!(check_capacity_change(2, 2), Ok(()));
        assert_eq!(check_capacity_change(5, 0), Ok(()));
        assert_eq!(
            check_capacity_change(1, 2),
            Err(BookingRejection::CapacityBelowReservas { capacidad: 1, reservas: 2 })
        );
    }

    #[test]
    fn test_rejections_map_to_http_errors() {
        assert!(matches!(AppError::from(BookingRejection::TurnoNotFound), AppError::NotFound(_)));
        assert!(matches!(AppError::from(BookingRejection::CapacityExceeded), AppError::BadRequest(_)));
        assert!(matches!(AppError::from(BookingRejection::DuplicateBooking), AppError::BadRequest(_)));
        assert!(matches!(
            AppError::from(BookingRejection::CapacityBelowReservas { capacidad: 1, reservas: 3 }),
            AppError::BadRequest(msg) if msg == "No se puede reducir la capacidad a 1: ya existen 3 reservas"
        ));
    }
}
