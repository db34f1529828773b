use super::*;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::web;
use lds_core::ID;
use lds_core::Unique;
use lds_mail::Postman;
use std::time::SystemTime;

pub async fn signup<R: UserRepository + 'static>(
    db: web::Data<R>,
    postman: web::Data<Postman>,
    req: web::Json<SignupRequest>,
) -> Result<HttpResponse, Failure> {
    let req = req.into_inner();
    if !email_shaped(&req.email) || req.email.chars().count() > lds_core::EMAIL_MAX_LENGTH {
        return Err(Failure::invalid("Email incorrect"));
    }
    if req.name.trim().is_empty() || req.name.chars().count() > lds_core::NAME_MAX_LENGTH {
        return Err(Failure::invalid(format!(
            "Name must be between 1 and {} characters",
            lds_core::NAME_MAX_LENGTH
        )));
    }
    let clashes = db
        .clashes(&req.name, &req.email, &req.wallet_address)
        .await?;
    if clashes.iter().any(|m| m.email() == req.email) {
        return Err(Failure::invalid("Email already exists"));
    }
    if clashes.iter().any(|m| m.named(&req.name)) {
        return Err(Failure::invalid("Name already exists"));
    }
    if req.password != req.confirm_password {
        return Err(Failure::invalid("Your passwords do not match"));
    }
    if !password::acceptable(&req.password) {
        return Err(Failure::invalid("Password must be at least 8 characters"));
    }
    if clashes
        .iter()
        .any(|m| m.wallet() == wallet::normalize(&req.wallet_address))
    {
        return Err(Failure::invalid("Wallet address already used"));
    }
    if !wallet::signed_by(&req.wallet_address, lds_core::SIGNUP_CHALLENGE, &req.signature) {
        return Err(Failure::invalid("Signature is incorrect"));
    }
    let hashword = password::hash(&req.password)?;
    let member = Member::new(ID::default(), req.email, req.name, req.wallet_address);
    db.create(&member, &hashword).await?;
    log::info!("new user created ({})", member.email());
    postman
        .verify(member.email(), member.name(), member.verify_token())
        .await
        .inspect_err(|e| log::error!("cannot send verification email to {}: {:#}", member.email(), e))
        .ok();
    Ok(HttpResponse::Ok().json(MessageResponse::new("signup successful")))
}

pub async fn login<R: UserRepository + 'static>(
    db: web::Data<R>,
    crypto: web::Data<Crypto>,
    tokens: web::Data<Tokens>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, Failure> {
    let (member, hashword) = db
        .lookup(&req.email)
        .await?
        .ok_or_else(|| Failure::unauthorized("User not found"))?;
    if !member.verified() {
        return Err(Failure::unauthorized("Please verify your account first"));
    }
    if !password::verify(&req.password, &hashword) {
        return Err(Failure::unauthorized("Wrong username or password"));
    }
    let token = crypto.access(member.identity())?;
    let refresh = crypto.refresh(member.identity())?;
    tokens
        .insert(Grant {
            token: token.clone(),
            refresh: refresh.clone(),
            user: member.identity(),
        })
        .await;
    log::info!("user {} logged in", member.email());
    Ok(HttpResponse::Ok()
        .cookie(cookie(lds_core::ACCESS_COOKIE, token.clone()))
        .cookie(cookie(lds_core::REFRESH_COOKIE, refresh.clone()))
        .json(LoginResponse {
            token,
            refresh_token: refresh,
        }))
}

pub async fn token(
    crypto: web::Data<Crypto>,
    tokens: web::Data<Tokens>,
    req: web::Json<RefreshRequest>,
) -> Result<HttpResponse, Failure> {
    let grant = tokens
        .get(&req.refresh_token)
        .await
        .ok_or_else(|| Failure::unauthorized("Unauthorized"))?;
    if crypto.decode_refresh(&grant.refresh).is_err() {
        tokens.remove(&grant.refresh).await;
        return Err(Failure::unauthorized("Unauthorized"));
    }
    let token = crypto.reissue(grant.user.clone())?;
    tokens.rotate(&grant.refresh, token.clone()).await;
    Ok(HttpResponse::Ok()
        .cookie(cookie(lds_core::ACCESS_COOKIE, token.clone()))
        .json(TokenResponse { token }))
}

pub async fn logout(tokens: web::Data<Tokens>, req: HttpRequest) -> HttpResponse {
    if let Some(refresh) = req.cookie(lds_core::REFRESH_COOKIE) {
        tokens.remove(refresh.value()).await;
    }
    let mut response = HttpResponse::Ok();
    forget(&mut response, lds_core::ACCESS_COOKIE);
    forget(&mut response, lds_core::REFRESH_COOKIE);
    response.json(MessageResponse::new("logged out"))
}

pub async fn verify_account<R: UserRepository + 'static>(
    db: web::Data<R>,
    req: web::Json<VerifyRequest>,
) -> Result<HttpResponse, Failure> {
    let member = db
        .by_verify_token(&req.verify_token)
        .await?
        .ok_or_else(|| Failure::invalid("Incorrect verification code"))?;
    db.verify(member.id()).await?;
    log::info!("user {} verified", member.email());
    Ok(HttpResponse::Ok().json(MessageResponse::new(
        "Your account is now verified, you can proceed to login.",
    )))
}

pub async fn send_verify_link<R: UserRepository + 'static>(
    db: web::Data<R>,
    postman: web::Data<Postman>,
    req: web::Json<EmailRequest>,
) -> Result<HttpResponse, Failure> {
    let (member, _) = db
        .lookup(&req.email)
        .await?
        .ok_or_else(|| Failure::invalid("invalid email"))?;
    if member.verified() {
        return Err(Failure::invalid("Already verified"));
    }
    let now = SystemTime::now();
    if let Some(at) = member.resend_at().filter(|at| *at > now) {
        return Err(Failure::Cooldown {
            message: "Can only request activation link every 60 seconds".to_string(),
            can_request: lds_core::unix(at),
        });
    }
    postman
        .verify(member.email(), member.name(), member.verify_token())
        .await?;
    db.stamp(member.id(), now).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new(
        "An email has been sent to your mailbox, please click the link in the message to verify your account.",
    )))
}

pub async fn forgot_password<R: UserRepository + 'static>(
    db: web::Data<R>,
    postman: web::Data<Postman>,
    req: web::Json<EmailRequest>,
) -> Result<HttpResponse, Failure> {
    let (member, _) = db
        .lookup(&req.email)
        .await?
        .ok_or_else(|| Failure::invalid("invalid email"))?;
    let reset = Reset::random();
    db.forgot(member.id(), &reset).await?;
    postman
        .forgot(member.email(), member.name(), reset.token())
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new(
        "An email has been sent to your email. Password reset link is only valid for 10 minutes.",
    )))
}

pub async fn reset_password<R: UserRepository + 'static>(
    db: web::Data<R>,
    postman: web::Data<Postman>,
    req: web::Json<ResetRequest>,
) -> Result<HttpResponse, Failure> {
    let member = db
        .by_reset_token(&req.token, SystemTime::now())
        .await?
        .ok_or_else(|| Failure::invalid("invalid token"))?;
    if req.password != req.verified_password {
        return Err(Failure::invalid("passwords do not match"));
    }
    if !password::acceptable(&req.password) {
        return Err(Failure::invalid("Password must be at least 8 characters"));
    }
    let hashword = password::hash(&req.password)?;
    db.rehash(member.id(), &hashword).await?;
    log::info!("user {} reset their password", member.email());
    postman
        .confirm(member.email(), member.name())
        .await
        .inspect_err(|e| log::error!("cannot send reset confirmation to {}: {:#}", member.email(), e))
        .ok();
    Ok(HttpResponse::Ok().json(MessageResponse::new("password updated")))
}

pub async fn nonce<R: UserRepository + 'static>(
    db: web::Data<R>,
    path: web::Path<String>,
) -> Result<HttpResponse, Failure> {
    let member = db
        .by_wallet(&path.into_inner())
        .await?
        .ok_or_else(|| Failure::invalid("invalid wallet"))?;
    Ok(HttpResponse::Ok().json(NonceResponse {
        nonce: member.nonce(),
    }))
}

pub async fn verify_signature<R: UserRepository + 'static>(
    db: web::Data<R>,
    req: web::Json<SignatureRequest>,
) -> Result<HttpResponse, Failure> {
    let member = db
        .by_wallet(&req.wallet_address)
        .await?
        .ok_or_else(|| Failure::invalid("invalid wallet"))?;
    let message = wallet::challenge(member.nonce());
    if wallet::signed_by(member.wallet(), &message, &req.signature) {
        db.renonce(member.id(), wallet::nonce()).await?;
        Ok(HttpResponse::Ok().json(SignatureResponse { verified: true }))
    } else {
        Ok(HttpResponse::Unauthorized().json(SignatureResponse { verified: false }))
    }
}

/// Structural email check: `local@label.label.tld` without whitespace.
/// Domain labels are alphanumeric with inner hyphens; the TLD is at least two letters.
fn email_shaped(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let labels = domain.split('.').collect::<Vec<_>>();
    !local.is_empty()
        && !email.chars().any(char::is_whitespace)
        && labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
        && labels
            .last()
            .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape() {
        assert!(email_shaped("ada@example.com"));
        assert!(email_shaped("a.b+c@mail.example.co.uk"));
        assert!(!email_shaped("ada"));
        assert!(!email_shaped("@example.com"));
        assert!(!email_shaped("ada@example"));
        assert!(!email_shaped("ada@.com"));
        assert!(!email_shaped("ada@example."));
        assert!(!email_shaped("ada@exa mple.com"));
        assert!(!email_shaped("a@b@example.com"));
        assert!(!email_shaped("a@-b.com"));
        assert!(!email_shaped("a@b-.com"));
        assert!(!email_shaped("a@b.c"));
        assert!(!email_shaped("a@b..com"));
        assert!(email_shaped("a@my-host.io"));
    }
}
