// Registration, login and OTP-based password reset.

pub mod handlers;
pub mod mailer;
pub mod otp;
pub mod repository;
