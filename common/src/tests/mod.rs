mod http_status;
mod naming;
