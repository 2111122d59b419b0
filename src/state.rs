use std::sync::Arc;
use crate::domain::ports::{
    UsuarioRepository, EmprendedorRepository, ServicioRepository, TurnoRepository,
    ReservaRepository
};
use crate::domain::services::auth_service::AuthService;
use crate::config::Config;

/// Shared handles threaded into every handler through `State<Arc<AppState>>`.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub usuario_repo: Arc<dyn UsuarioRepository>,
    pub emprendedor_repo: Arc<dyn EmprendedorRepository>,
    pub servicio_repo: Arc<dyn ServicioRepository>,
    pub turno_repo: Arc<dyn TurnoRepository>,
    pub reserva_repo: Arc<dyn ReservaRepository>,
    pub auth_service: Arc<AuthService>,
}
