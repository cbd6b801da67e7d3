use std::sync::Arc;
use crate::domain::ports::{
    AvailabilityRepository, CartRepository, CatalogRepository, CheckoutGateway,
    CreditRepository, LessonRepository, RoomService,
};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub catalog_repo: Arc<dyn CatalogRepository>,
    pub availability_repo: Arc<dyn AvailabilityRepository>,
    pub lesson_repo: Arc<dyn LessonRepository>,
    pub cart_repo: Arc<dyn CartRepository>,
    pub credit_repo: Arc<dyn CreditRepository>,
    pub checkout_gateway: Arc<dyn CheckoutGateway>,
    pub room_service: Arc<dyn RoomService>,
}
