pub mod send_calendar_reminders;
pub mod send_task_reminders;

use actix_web::web;
use send_calendar_reminders::send_calendar_reminders_controller;
use send_task_reminders::send_task_reminders_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/reminders/calendar",
        web::post().to(send_calendar_reminders_controller),
    );
    cfg.route(
        "/reminders/tasks",
        web::post().to(send_task_reminders_controller),
    );
}
