// src/services/mail_templates.rs

pub const WELCOME_SUBJECT: &str = "Bem-vindo ao SAP";
pub const RESET_PASSWORD_SUBJECT: &str = "Sua nova senha de acesso";

/// E-mail de boas-vindas enviado quando o administrador cria um usuário.
pub fn welcome_user(name: &str, password: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
    <meta charset="UTF-8">
    <title>Bem-vindo ao SAP</title>
    <style>
        body {{ font-family: Arial, sans-serif; background-color: #f4f4f4; margin: 0; padding: 0; }}
        .container {{ max-width: 600px; margin: 0 auto; background-color: #ffffff; padding: 20px; border-radius: 8px; }}
        .header {{ background-color: #004080; padding: 20px; border-radius: 8px 8px 0 0; color: #ffffff; text-align: center; }}
        .content {{ padding: 20px; font-size: 16px; }}
        .password {{ font-size: 20px; font-weight: bold; color: #004080; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header"><h1>Bem-vindo ao SAP</h1></div>
        <div class="content">
            <p>Olá, {name}!</p>
            <p>Sua conta foi criada. Use a senha abaixo no primeiro acesso e troque-a em seguida:</p>
            <p class="password">{password}</p>
        </div>
    </div>
</body>
</html>"#
    )
}

/// E-mail com a senha provisória gerada na redefinição.
pub fn reset_password(name: &str, new_password: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
    <meta charset="UTF-8">
    <title>Reenvio de Senha</title>
    <style>
        body {{ font-family: Arial, sans-serif; background-color: #f4f4f4; margin: 0; padding: 0; }}
        .container {{ max-width: 600px; margin: 0 auto; background-color: #ffffff; padding: 20px; border-radius: 8px; }}
        .header {{ background-color: #004080; padding: 20px; border-radius: 8px 8px 0 0; color: #ffffff; text-align: center; }}
        .content {{ padding: 20px; font-size: 16px; }}
        .password {{ font-size: 20px; font-weight: bold; color: #004080; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header"><h1>Reenvio de Senha</h1></div>
        <div class="content">
            <p>Olá, {name}!</p>
            <p>Recebemos um pedido de redefinição. Sua nova senha provisória é:</p>
            <p class="password">{new_password}</p>
            <p>Troque-a assim que entrar no sistema.</p>
        </div>
    </div>
</body>
</html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_carregam_nome_e_senha() {
        let html = welcome_user("Maria", "Abc123XYZ0");
        assert!(html.contains("Maria"));
        assert!(html.contains("Abc123XYZ0"));

        let html = reset_password("João", "Xyz789AB12");
        assert!(html.contains("João"));
        assert!(html.contains("Xyz789AB12"));
    }
}
