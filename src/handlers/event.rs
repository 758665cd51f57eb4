use actix_web::{Responder, web, get, post, patch, HttpResponse};
use uuid::Uuid;
use crate::{dto::{EventResponse, EventsQuery, NewEventDto, UpdateEventDto}, service, store::EventStore};

#[post("/")]
pub async fn create(new_event_dto: web::Json<NewEventDto>, store: web::Data<EventStore>) -> impl Responder {
   let event = service::event::create(store.get_ref(), new_event_dto.into_inner());
   HttpResponse::Created().json(EventResponse::from(event))
}

#[get("/")]
pub async fn get_all(query: web::Query<EventsQuery>, store: web::Data<EventStore>) -> impl Responder {
   let events = service::event::get_all(store.get_ref(), &query);
   let response: Vec<EventResponse> = events.into_iter().map(EventResponse::from).collect();
   HttpResponse::Ok().json(response)
}

#[get("/{id}")]
pub async fn get_by_id(id: web::Path<Uuid>, store: web::Data<EventStore>) -> impl Responder {
   let res = service::event::get_by_id(store.get_ref(), id.into_inner());
   match res {
      Ok(event) => HttpResponse::Ok().json(EventResponse::from(event)),
      Err(err) => HttpResponse::from_error(err)
   }
}

#[get("/{id}/count")]
pub async fn attendance_count(id: web::Path<Uuid>, store: web::Data<EventStore>) -> impl Responder {
   let res = service::rsvp::attendance_count(store.get_ref(), id.into_inner());
   match res {
      Ok(count) => HttpResponse::Ok().json(serde_json::json!({ "count": count })),
      Err(err) => HttpResponse::from_error(err)
   }
}

// Lives under the singular /api/event/{id} path the clients already use.
#[patch("/{id}")]
pub async fn update(
   id: web::Path<Uuid>,
   update_event_dto: web::Json<UpdateEventDto>,
   store: web::Data<EventStore>
) -> impl Responder {
   let res = service::event::update(
      store.get_ref(),
      id.into_inner(),
      update_event_dto.into_inner()
   );
   match res {
      Ok(event) => HttpResponse::Ok().json(EventResponse::from(event)),
      Err(err) => HttpResponse::from_error(err)
   }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
   cfg.service(create);
   cfg.service(get_all);
   cfg.service(attendance_count);
   cfg.service(get_by_id);
}

pub fn init_patch_routes(cfg: &mut web::ServiceConfig) {
   cfg.service(update);
}
