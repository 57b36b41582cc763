use uuid::Uuid;

use crate::models::Event;
use crate::payment::{CheckoutSessionRequest, PaymentError};

/// Unit amount in the processor's minor-unit convention: a free event is
/// always 0 whatever its `price` says, otherwise `price * 100` rounded.
pub fn unit_amount_minor(price: &str, is_free: bool) -> Result<i64, PaymentError> {
    if is_free {
        return Ok(0);
    }
    let price: f64 = price
        .trim()
        .parse()
        .map_err(|_| PaymentError::InvalidAmount(format!("unparseable price {price:?}")))?;
    if !price.is_finite() || price < 0.0 {
        return Err(PaymentError::InvalidAmount(format!("invalid price {price}")));
    }
    Ok((price * 100.0).round() as i64)
}

/// Build the session request for one ticket to `event`, bought by
/// `buyer_id`. Success lands on the buyer's profile; cancel returns to the
/// event page.
pub fn build_session_request(
    event: &Event,
    buyer_id: Uuid,
    currency: &str,
    base_url: &str,
) -> Result<CheckoutSessionRequest, PaymentError> {
    let unit_amount = unit_amount_minor(&event.price, event.is_free)?;

    Ok(CheckoutSessionRequest {
        product_name: event.title.clone(),
        unit_amount,
        currency: currency.to_string(),
        quantity: 1,
        event_id: event.id,
        buyer_id,
        success_url: format!("{base_url}/profile"),
        cancel_url: format!("{base_url}/events/{}", event.id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn event(price: &str, is_free: bool) -> Event {
        Event {
            id: Uuid::new_v4(),
            title: "Rust Meetup".to_string(),
            price: price.to_string(),
            is_free,
            organizer_id: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_paid_event_converts_to_minor_units() {
        assert_eq!(unit_amount_minor("25.50", false).unwrap(), 2550);
        assert_eq!(unit_amount_minor("100", false).unwrap(), 10000);
        assert_eq!(unit_amount_minor("0.99", false).unwrap(), 99);
    }

    #[test]
    fn test_free_event_is_zero_regardless_of_price() {
        assert_eq!(unit_amount_minor("25.50", true).unwrap(), 0);
        assert_eq!(unit_amount_minor("not-a-number", true).unwrap(), 0);
    }

    #[test]
    fn test_unparseable_price_is_rejected() {
        assert!(matches!(
            unit_amount_minor("abc", false),
            Err(PaymentError::InvalidAmount(_))
        ));
        assert!(matches!(
            unit_amount_minor("-5", false),
            Err(PaymentError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_session_request_carries_metadata_and_urls() {
        let event = event("25.50", false);
        let buyer = Uuid::new_v4();
        let request =
            build_session_request(&event, buyer, "inr", "https://tickets.example").unwrap();

        assert_eq!(request.unit_amount, 2550);
        assert_eq!(request.quantity, 1);
        assert_eq!(request.currency, "inr");
        assert_eq!(request.event_id, event.id);
        assert_eq!(request.buyer_id, buyer);
        assert_eq!(request.success_url, "https://tickets.example/profile");
        assert_eq!(
            request.cancel_url,
            format!("https://tickets.example/events/{}", event.id)
        );
    }
}
