use std::sync::Arc;

use tonic::Request;
use tonic::Response;
use tonic::Status;

use super::handlers::login;
use super::handlers::verify_token;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::auth_service_server::AuthService as AuthServiceProto;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;
use crate::proto::VerifyTokenRequest;
use crate::proto::VerifyTokenResponse;

pub struct AuthGrpcService {
    service: Arc<dyn AuthServicePort>,
}

impl AuthGrpcService {
    pub fn new(service: Arc<dyn AuthServicePort>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl AuthServiceProto for AuthGrpcService {
    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<LoginResponse>, Status> {
        let response = login::login(self.service.clone(), request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn verify_token(
        &self,
        request: Request<VerifyTokenRequest>,
    ) -> Result<Response<VerifyTokenResponse>, Status> {
        let response =
            verify_token::verify_token(self.service.clone(), request.into_inner()).await?;
        Ok(Response::new(response))
    }
}
