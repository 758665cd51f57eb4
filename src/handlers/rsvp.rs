use actix_web::{Responder, web, get, post, delete, HttpResponse};
use uuid::Uuid;
use crate::{dto::NewRsvpDto, service, store::EventStore};

#[post("/{event_id}")]
pub async fn submit(event_id: web::Path<Uuid>, new_rsvp_dto: web::Json<NewRsvpDto>, store: web::Data<EventStore>) -> impl Responder {
   let res = service::rsvp::submit(
      store.get_ref(),
      event_id.into_inner(),
      new_rsvp_dto.into_inner()
   );
   match res {
      Ok(rsvp) => HttpResponse::Ok().json(rsvp),
      Err(err) => HttpResponse::from_error(err)
   }
}

#[get("/{event_id}")]
pub async fn get_all(event_id: web::Path<Uuid>, store: web::Data<EventStore>) -> impl Responder {
   let res = service::rsvp::get_all(store.get_ref(), event_id.into_inner());
   match res {
      Ok(rsvps) => HttpResponse::Ok().json(rsvps),
      Err(err) => HttpResponse::from_error(err)
   }
}

#[get("/{event_id}/{rsvp_id}")]
pub async fn get_by_id(path: web::Path<(Uuid, Uuid)>, store: web::Data<EventStore>) -> impl Responder {
   let (event_id, rsvp_id) = path.into_inner();
   let res = service::rsvp::get(store.get_ref(), event_id, rsvp_id);
   match res {
      Ok(rsvp) => HttpResponse::Ok().json(rsvp),
      Err(err) => HttpResponse::from_error(err)
   }
}

// Hard un-RSVP: the record disappears from the ledger.
#[delete("/{event_id}/{rsvp_id}")]
pub async fn remove(path: web::Path<(Uuid, Uuid)>, store: web::Data<EventStore>) -> impl Responder {
   let (event_id, rsvp_id) = path.into_inner();
   let res = service::rsvp::remove(store.get_ref(), event_id, rsvp_id);
   match res {
      Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "deleted": true })),
      Err(err) => HttpResponse::from_error(err)
   }
}

// Soft cancel: the "decline" path, history retained.
#[post("/{event_id}/{rsvp_id}/cancel")]
pub async fn cancel(path: web::Path<(Uuid, Uuid)>, store: web::Data<EventStore>) -> impl Responder {
   let (event_id, rsvp_id) = path.into_inner();
   let res = service::rsvp::cancel(store.get_ref(), event_id, rsvp_id);
   match res {
      Ok(rsvp) => HttpResponse::Ok().json(rsvp),
      Err(err) => HttpResponse::from_error(err)
   }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
   cfg.service(submit);
   cfg.service(get_all);
   cfg.service(cancel);
   cfg.service(get_by_id);
   cfg.service(remove);
}
