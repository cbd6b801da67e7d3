pub mod http_room_service;
