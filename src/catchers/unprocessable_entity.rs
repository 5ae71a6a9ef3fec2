use rocket::response::status;
use rocket::response::status::BadRequest;
use rocket::Request;

/// Event bodies that parse as JSON but lack `fields` are a client error
/// like any other malformed payload.
#[catch(422)]
pub fn unprocessable_entity_to_bad_request(req: &Request) -> BadRequest<()> {
    tracing::warn!(uri = %req.uri(), "Rejecting a malformed event payload");
    status::BadRequest::<()>(())
}
